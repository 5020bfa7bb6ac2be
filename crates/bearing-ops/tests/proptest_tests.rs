//! Property-based tests for section geometry using the `proptest` crate.

use proptest::prelude::*;

use bearing_ops::{
    derive_points, draw_profile, open_profile_sketch, select_profiles, BearingCurves,
    BearingParams, OuterBoundary,
};
use bearing_types::{CurveGeometry, CurveHandle};
use host_kernel::{MemoryHost, ModelingHost, SketchHandle};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Clearance as a fraction of the horizontal thickness, zero included.
fn arb_gap_frac() -> impl Strategy<Value = f64> {
    prop_oneof![1 => Just(0.0), 9 => 0.01f64..0.95]
}

/// Valid parameter sets. Elevation is kept away from zero.
fn arb_params() -> impl Strategy<Value = BearingParams> {
    (
        0.5f64..10.0,
        0.2f64..5.0,
        0.2f64..5.0,
        0.2f64..0.95,
        arb_gap_frac(),
        0.05f64..0.9,
        any::<bool>(),
    )
        .prop_map(|(r, h, v, hole_frac, gap_frac, rise_frac, up)| {
            let elevation = rise_frac * v / 2.0;
            BearingParams {
                inner_radius: r,
                horizontal_thickness: h,
                vertical_thickness: v,
                hole_radius: hole_frac * h.min(v) / 2.0,
                divot_clearance: gap_frac * h,
                elevation: if up { elevation } else { -elevation },
            }
        })
}

fn drawn(params: &BearingParams) -> (MemoryHost, SketchHandle, BearingCurves) {
    let mut host = MemoryHost::new();
    let comp = host.add_component().unwrap();
    let sketch = open_profile_sketch(&mut host, comp).unwrap();
    let curves = draw_profile(&mut host, sketch, params, OuterBoundary::Rectangle).unwrap();
    (host, sketch, curves)
}

/// X of a vertical line in the sketch.
fn wall_x(host: &MemoryHost, sketch: SketchHandle, handle: CurveHandle) -> f64 {
    let curve = host
        .sketch_curves(sketch)
        .unwrap()
        .iter()
        .find(|c| c.handle == handle)
        .unwrap();
    match curve.geometry {
        CurveGeometry::Line { start, end } => {
            assert!((start.x - end.x).abs() < TOL, "wall is not vertical");
            start.x
        }
        CurveGeometry::Circle { .. } => panic!("wall should be a line"),
    }
}

const TOL: f64 = 1e-9;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_params_validate(params in arb_params()) {
        prop_assert!(params.validate().is_ok());
    }

    #[test]
    fn point_derivation_is_deterministic(params in arb_params()) {
        prop_assert_eq!(derive_points(&params), derive_points(&params));
    }

    #[test]
    fn offset_seeds_are_symmetric(params in arb_params()) {
        let pts = derive_points(&params);
        let mid = pts.hole_center.x;
        prop_assert!(((pts.offset_seed_outer.x - mid) - (mid - pts.offset_seed_inner.x)).abs() < TOL);
        prop_assert!(
            (pts.offset_seed_outer.x - pts.offset_seed_inner.x - params.divot_clearance).abs() < TOL
        );
        prop_assert_eq!(pts.offset_seed_outer.y, pts.hole_center.y);
    }

    #[test]
    fn changing_clearance_moves_only_offset_seeds(
        params in arb_params(),
        other_frac in arb_gap_frac(),
    ) {
        let other = BearingParams {
            divot_clearance: other_frac * params.horizontal_thickness,
            ..params
        };
        prop_assert!(other.validate().is_ok());

        let before = derive_points(&params);
        let after = derive_points(&other);
        let mid = after.hole_center.x;
        let half = other.divot_clearance / 2.0;
        prop_assert!((after.offset_seed_outer.x - (mid + half)).abs() < TOL);
        prop_assert!((after.offset_seed_inner.x - (mid - half)).abs() < TOL);

        // Everything else is bit-identical.
        let mut rest = after;
        rest.offset_seed_outer = before.offset_seed_outer;
        rest.offset_seed_inner = before.offset_seed_inner;
        prop_assert_eq!(rest, before);

        let (host, sketch, curves) = drawn(&other);
        match curves.channel {
            Some([outer_wall, inner_wall]) => {
                prop_assert!(half > 0.0);
                prop_assert!((wall_x(&host, sketch, outer_wall) - (mid + half)).abs() < TOL);
                prop_assert!((wall_x(&host, sketch, inner_wall) - (mid - half)).abs() < TOL);
            }
            None => prop_assert_eq!(half, 0.0),
        }
    }

    #[test]
    fn guide_stays_inside_section(params in arb_params()) {
        let pts = derive_points(&params);
        prop_assert!(pts.guide_upper.x > pts.inner_bottom.x);
        prop_assert!(pts.guide_upper.x < pts.hole_left.x);
        prop_assert!(pts.guide_start.y < 0.0);
        prop_assert!(pts.guide_start.y > -params.vertical_thickness);
    }

    #[test]
    fn drawing_is_deterministic(params in arb_params()) {
        let draw = || {
            let (host, sketch, _) = drawn(&params);
            host.sketch_curves(sketch).unwrap().to_vec()
        };
        prop_assert_eq!(draw(), draw());
    }

    #[test]
    fn every_valid_section_has_three_races(params in arb_params()) {
        let (mut host, sketch, curves) = drawn(&params);
        let profiles = host.profiles(sketch).unwrap();
        let selected = select_profiles(&profiles, &curves);
        prop_assert!(selected.is_ok(), "{:?} for {:?}", selected, params);
    }
}
