use bearing_types::{BodyHandle, ComponentHandle, CurveHandle, SketchHandle};
use host_kernel::{ModelingHost, RevolveInput};
use tracing::debug;

use crate::select::SelectedProfiles;
use crate::types::OpError;

/// The two revolve features of a bearing: outer race with the bottom inner
/// race, then the top inner race on its own.
pub fn plan_revolves(
    sketch: SketchHandle,
    axis: CurveHandle,
    selected: &SelectedProfiles,
) -> [RevolveInput; 2] {
    [
        RevolveInput::full_turn(
            sketch,
            vec![selected.outer_race, selected.inner_bottom],
            axis,
        ),
        RevolveInput::full_turn(sketch, vec![selected.inner_top], axis),
    ]
}

/// Execute a revolve operation.
pub fn execute_revolve(
    host: &mut dyn ModelingHost,
    component: ComponentHandle,
    input: &RevolveInput,
) -> Result<BodyHandle, OpError> {
    let body = host.revolve(component, input)?;
    debug!(%body, profiles = input.profiles.len(), angle = input.angle, "revolved");
    Ok(body)
}
