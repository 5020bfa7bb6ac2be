//! Helper functions: error type, host wrappers, generation shortcuts.

use bearing_engine::{generate, BearingConfig, BearingOutput};
use bearing_ops::BearingParams;
use host_kernel::{
    BodyHandle, ComponentHandle, ConstructionPlane, CurveHandle, HostError, MemoryHost,
    ModelingHost, PlaneHandle, Point3, Profile, ProfileId, RevolveInput, SketchHandle,
};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("generation failed: {0}")]
    Generate(#[from] bearing_engine::GenerateError),

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },
}

// ── Run Helpers ─────────────────────────────────────────────────────────────

/// Generate with `params` in a fresh `MemoryHost`.
pub fn generate_in_memory(
    params: BearingParams,
) -> Result<(MemoryHost, BearingOutput), HarnessError> {
    let mut host = MemoryHost::new();
    let config = BearingConfig {
        params,
        ..BearingConfig::default()
    };
    let output = generate(&config, &mut host)?;
    Ok((host, output))
}

// ── Profile Reordering Host ─────────────────────────────────────────────────

/// How [`ReorderingHost`] rewrites the profile list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOrder {
    Reversed,
    Rotated(usize),
    /// Every profile appears twice, the copy with its id shifted by 1000.
    Duplicated,
    /// No profiles at all.
    Emptied,
}

/// Wraps a host and tampers with the order or content of `profiles()`.
/// Everything else is passed through.
pub struct ReorderingHost<H> {
    pub inner: H,
    pub order: ProfileOrder,
}

impl<H: ModelingHost> ReorderingHost<H> {
    pub fn new(inner: H, order: ProfileOrder) -> Self {
        Self { inner, order }
    }
}

impl<H: ModelingHost> ModelingHost for ReorderingHost<H> {
    fn add_component(&mut self) -> Result<ComponentHandle, HostError> {
        self.inner.add_component()
    }

    fn set_component_name(
        &mut self,
        component: ComponentHandle,
        name: &str,
    ) -> Result<(), HostError> {
        self.inner.set_component_name(component, name)
    }

    fn construction_plane(
        &self,
        component: ComponentHandle,
        plane: ConstructionPlane,
    ) -> Result<PlaneHandle, HostError> {
        self.inner.construction_plane(component, plane)
    }

    fn add_sketch(
        &mut self,
        component: ComponentHandle,
        plane: PlaneHandle,
    ) -> Result<SketchHandle, HostError> {
        self.inner.add_sketch(component, plane)
    }

    fn add_line(
        &mut self,
        sketch: SketchHandle,
        start: Point3,
        end: Point3,
    ) -> Result<CurveHandle, HostError> {
        self.inner.add_line(sketch, start, end)
    }

    fn add_two_point_rectangle(
        &mut self,
        sketch: SketchHandle,
        first: Point3,
        second: Point3,
    ) -> Result<[CurveHandle; 4], HostError> {
        self.inner.add_two_point_rectangle(sketch, first, second)
    }

    fn add_circle(
        &mut self,
        sketch: SketchHandle,
        center: Point3,
        radius: f64,
    ) -> Result<CurveHandle, HostError> {
        self.inner.add_circle(sketch, center, radius)
    }

    fn offset(
        &mut self,
        sketch: SketchHandle,
        curves: &[CurveHandle],
        direction_point: Point3,
        distance: f64,
    ) -> Result<Vec<CurveHandle>, HostError> {
        self.inner.offset(sketch, curves, direction_point, distance)
    }

    fn profiles(&mut self, sketch: SketchHandle) -> Result<Vec<Profile>, HostError> {
        let mut profiles = self.inner.profiles(sketch)?;
        match self.order {
            ProfileOrder::Reversed => profiles.reverse(),
            ProfileOrder::Rotated(n) => {
                if !profiles.is_empty() {
                    let n = n % profiles.len();
                    profiles.rotate_left(n);
                }
            }
            ProfileOrder::Duplicated => {
                let copies: Vec<Profile> = profiles
                    .iter()
                    .map(|p| Profile {
                        id: ProfileId(p.id.0 + 1000),
                        ..p.clone()
                    })
                    .collect();
                profiles.extend(copies);
            }
            ProfileOrder::Emptied => profiles.clear(),
        }
        Ok(profiles)
    }

    fn revolve(
        &mut self,
        component: ComponentHandle,
        input: &RevolveInput,
    ) -> Result<BodyHandle, HostError> {
        self.inner.revolve(component, input)
    }

    fn delete_body(&mut self, body: BodyHandle) -> Result<(), HostError> {
        self.inner.delete_body(body)
    }

    fn delete_sketch(&mut self, sketch: SketchHandle) -> Result<(), HostError> {
        self.inner.delete_sketch(sketch)
    }

    fn delete_component(&mut self, component: ComponentHandle) -> Result<(), HostError> {
        self.inner.delete_component(component)
    }

    fn report_failure(&mut self, message: &str) {
        self.inner.report_failure(message)
    }
}
