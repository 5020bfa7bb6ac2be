//! Drawing the bearing cross-section into a host sketch.

use bearing_types::{ComponentHandle, ConstructionPlane, CurveHandle, Point3, SketchHandle};
use host_kernel::ModelingHost;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::params::BearingParams;
use crate::points::{derive_points, ProfilePoints};
use crate::types::OpError;

/// How the outer boundary of the section is drawn.
///
/// Both styles produce the same closed rectangle and the same edge roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OuterBoundary {
    /// One two-point rectangle call.
    #[default]
    Rectangle,
    /// Four separate lines.
    FourEdges,
}

/// Handles of every curve drawn for the section, by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingCurves {
    pub lead_in: CurveHandle,
    /// Edge on `y = 0`.
    pub bottom: CurveHandle,
    /// Edge on `x = r + h`.
    pub outer: CurveHandle,
    /// Edge on `y = -v`.
    pub top: CurveHandle,
    /// Edge on `x = r`.
    pub inner: CurveHandle,
    pub axis: CurveHandle,
    pub hole: CurveHandle,
    pub midline: CurveHandle,
    /// Outer and inner channel walls; absent when the clearance is zero.
    pub channel: Option<[CurveHandle; 2]>,
    pub guides: Vec<CurveHandle>,
}

/// Create the section sketch on the component's XZ plane.
pub fn open_profile_sketch(
    host: &mut dyn ModelingHost,
    component: ComponentHandle,
) -> Result<SketchHandle, OpError> {
    let plane = host.construction_plane(component, ConstructionPlane::XZ)?;
    Ok(host.add_sketch(component, plane)?)
}

/// Draw the full section into `sketch`.
///
/// Curves are added in a fixed order: lead-in, outer boundary, axis, hole,
/// midline, channel offsets, elevation guide.
#[instrument(skip_all, fields(%sketch, ?outer_boundary))]
pub fn draw_profile(
    host: &mut dyn ModelingHost,
    sketch: SketchHandle,
    params: &BearingParams,
    outer_boundary: OuterBoundary,
) -> Result<BearingCurves, OpError> {
    let pts = derive_points(params);

    let lead_in = host.add_line(sketch, pts.origin, pts.inner_bottom)?;
    let [bottom, outer, top, inner] = draw_outer_boundary(host, sketch, &pts, outer_boundary)?;
    let axis = host.add_line(sketch, pts.origin, pts.axis_end)?;
    let hole = host.add_circle(sketch, pts.hole_center, params.hole_radius)?;
    let midline = host.add_line(sketch, pts.mid_bottom, pts.mid_top)?;

    let channel = if params.divot_clearance > 0.0 {
        let distance = params.divot_clearance / 2.0;
        let outer_wall = offset_one(host, sketch, midline, pts.offset_seed_outer, distance)?;
        let inner_wall = offset_one(host, sketch, midline, pts.offset_seed_inner, distance)?;
        Some([outer_wall, inner_wall])
    } else {
        debug!("zero clearance, channel offsets skipped");
        None
    };

    let mut guides = vec![host.add_line(sketch, pts.guide_start, pts.guide_upper)?];
    if params.elevation != 0.0 {
        guides.push(host.add_line(sketch, pts.guide_upper, pts.guide_lower)?);
    }
    guides.push(host.add_line(sketch, pts.guide_lower, pts.hole_left)?);

    debug!(guides = guides.len(), channel = channel.is_some(), "section drawn");
    Ok(BearingCurves {
        lead_in,
        bottom,
        outer,
        top,
        inner,
        axis,
        hole,
        midline,
        channel,
        guides,
    })
}

/// Returns edges as `[bottom, outer, top, inner]`.
fn draw_outer_boundary(
    host: &mut dyn ModelingHost,
    sketch: SketchHandle,
    pts: &ProfilePoints,
    style: OuterBoundary,
) -> Result<[CurveHandle; 4], OpError> {
    match style {
        OuterBoundary::Rectangle => {
            Ok(host.add_two_point_rectangle(sketch, pts.inner_bottom, pts.outer_top)?)
        }
        OuterBoundary::FourEdges => {
            let outer_bottom = Point3::planar(pts.outer_top.x, pts.inner_bottom.y);
            let inner_top = Point3::planar(pts.inner_bottom.x, pts.outer_top.y);
            Ok([
                host.add_line(sketch, pts.inner_bottom, outer_bottom)?,
                host.add_line(sketch, outer_bottom, pts.outer_top)?,
                host.add_line(sketch, pts.outer_top, inner_top)?,
                host.add_line(sketch, inner_top, pts.inner_bottom)?,
            ])
        }
    }
}

fn offset_one(
    host: &mut dyn ModelingHost,
    sketch: SketchHandle,
    curve: CurveHandle,
    seed: Point3,
    distance: f64,
) -> Result<CurveHandle, OpError> {
    let produced = host.offset(sketch, &[curve], seed, distance)?;
    match produced.as_slice() {
        [single] => Ok(*single),
        _ => Err(OpError::UnexpectedOffset {
            curve,
            produced: produced.len(),
        }),
    }
}
