use bearing_types::Point3;
use serde::{Deserialize, Serialize};

use crate::params::BearingParams;

/// Every sketch point the bearing section needs.
///
/// The section spans `x ∈ [r, r + h]` and `y ∈ [-v, 0]`; `y = 0` is the
/// bottom edge and `y = -v` the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoints {
    pub origin: Point3,
    /// Corner where the inner edge meets the bottom edge.
    pub inner_bottom: Point3,
    /// Corner where the outer edge meets the top edge.
    pub outer_top: Point3,
    pub mid_bottom: Point3,
    pub mid_top: Point3,
    /// Where the elevation guide leaves the inner edge.
    pub guide_start: Point3,
    /// Upper and lower end of the guide's riser.
    pub guide_upper: Point3,
    pub guide_lower: Point3,
    /// Point of the hole circle nearest the inner edge.
    pub hole_left: Point3,
    pub hole_center: Point3,
    /// Far end of the revolve axis, which starts at `origin`.
    pub axis_end: Point3,
    /// Direction points for the two channel offsets.
    pub offset_seed_outer: Point3,
    pub offset_seed_inner: Point3,
}

/// Compute the section points. Pure; does not validate.
pub fn derive_points(params: &BearingParams) -> ProfilePoints {
    let r = params.inner_radius;
    let h = params.horizontal_thickness;
    let v = params.vertical_thickness;
    let hole = params.hole_radius;
    let c = params.divot_clearance;
    let e = params.elevation;

    let mid = r + h / 2.0;
    let half_height = -v / 2.0;
    let riser_x = (mid - hole - r) / 2.0 + r;

    ProfilePoints {
        origin: Point3::ORIGIN,
        inner_bottom: Point3::planar(r, 0.0),
        outer_top: Point3::planar(r + h, -v),
        mid_bottom: Point3::planar(mid, 0.0),
        mid_top: Point3::planar(mid, -v),
        guide_start: Point3::planar(r, half_height + e),
        guide_upper: Point3::planar(riser_x, half_height + e),
        guide_lower: Point3::planar(riser_x, half_height),
        hole_left: Point3::planar(mid - hole, half_height),
        hole_center: Point3::planar(mid, half_height),
        axis_end: Point3::planar(0.0, -v),
        offset_seed_outer: Point3::planar(mid + c / 2.0, half_height),
        offset_seed_inner: Point3::planar(mid - c / 2.0, half_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_section_points() {
        let pts = derive_points(&BearingParams::default());
        assert_eq!(pts.inner_bottom, Point3::planar(2.5, 0.0));
        assert_eq!(pts.outer_top, Point3::planar(3.5, -1.0));
        assert_eq!(pts.hole_center, Point3::planar(3.0, -0.5));
        assert_eq!(pts.axis_end, Point3::planar(0.0, -1.0));
        assert!((pts.guide_start.y - -0.7).abs() < 1e-12);
        assert!((pts.hole_left.x - 2.6975).abs() < 1e-12);
        assert!((pts.guide_upper.x - 2.59875).abs() < 1e-12);
        assert_eq!(pts.guide_upper.x, pts.guide_lower.x);
    }
}
