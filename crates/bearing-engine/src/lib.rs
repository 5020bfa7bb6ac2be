//! The bearing generation pipeline.
//!
//! Validates parameters, drives a [`ModelingHost`] through component,
//! sketch and revolve creation, and rolls the document back if any step
//! fails.

pub mod config;
pub mod journal;
pub mod types;

use bearing_ops::{
    draw_profile, execute_revolve, open_profile_sketch, plan_revolves, select_profiles,
};
use bearing_types::{BodyHandle, Profile, ProfileId, RegionKind};
use host_kernel::{ModelingHost, RevolveInput};
use tracing::{info, instrument, warn};

pub use config::{BearingConfig, ConfigError};
pub use journal::{Created, Journal};
pub use types::{BearingOutput, BodyReport, GenerateError};

/// Generate a bearing in `host`.
///
/// Parameters are validated before the first host call. On failure every
/// entity created so far is deleted again.
#[instrument(skip_all, fields(outer_boundary = ?config.outer_boundary))]
pub fn generate(
    config: &BearingConfig,
    host: &mut dyn ModelingHost,
) -> Result<BearingOutput, GenerateError> {
    config.params.validate()?;

    let mut journal = Journal::new();
    match build(config, host, &mut journal) {
        Ok(output) => {
            info!(
                name = %output.name,
                bodies = output.bodies.len(),
                volume = output.total_volume(),
                "bearing generated"
            );
            Ok(output)
        }
        Err(err) => {
            warn!(error = %err, created = journal.len(), "generation failed, rolling back");
            match journal.rollback(host) {
                Ok(()) => Err(err),
                Err(rollback) => Err(GenerateError::Rollback {
                    cause: Box::new(err),
                    rollback,
                }),
            }
        }
    }
}

/// Script entry point: generate, and report any failure through the host.
pub fn run(
    config: &BearingConfig,
    host: &mut dyn ModelingHost,
) -> Result<BearingOutput, GenerateError> {
    generate(config, host).inspect_err(|err| host.report_failure(&format!("Failed:\n{err}")))
}

fn build(
    config: &BearingConfig,
    host: &mut dyn ModelingHost,
    journal: &mut Journal,
) -> Result<BearingOutput, GenerateError> {
    let params = &config.params;

    let component = host.add_component()?;
    journal.record(Created::Component(component));
    let name = params.component_name();
    host.set_component_name(component, &name)?;

    let sketch = open_profile_sketch(host, component)?;
    journal.record(Created::Sketch(sketch));
    let curves = draw_profile(host, sketch, params, config.outer_boundary)?;

    let profiles = host.profiles(sketch)?;
    let selected = select_profiles(&profiles, &curves)?;

    let mut bodies = Vec::with_capacity(2);
    for input in plan_revolves(sketch, curves.axis, &selected) {
        let handle = execute_revolve(host, component, &input)?;
        journal.record(Created::Body(handle));
        bodies.push(body_report(handle, &input, &profiles, &selected.classified));
    }

    Ok(BearingOutput {
        component,
        name,
        sketch,
        profile_count: profiles.len(),
        regions: selected.classified,
        bodies,
    })
}

fn body_report(
    handle: BodyHandle,
    input: &RevolveInput,
    profiles: &[Profile],
    classified: &[(ProfileId, RegionKind)],
) -> BodyReport {
    let swept = |id| {
        profiles
            .iter()
            .find(|p| p.id == id)
            .map_or(0.0, |p| input.angle * p.area * p.centroid.x.abs())
    };
    let kinds = input
        .profiles
        .iter()
        .filter_map(|id| classified.iter().find(|(pid, _)| pid == id).map(|(_, k)| *k))
        .collect();
    BodyReport {
        handle,
        profiles: input.profiles.clone(),
        kinds,
        angle: input.angle,
        volume: input.profiles.iter().copied().map(swept).sum(),
    }
}
