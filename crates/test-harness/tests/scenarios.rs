//! End-to-end generation scenarios against MemoryHost.

use approx::assert_relative_eq;
use bearing_engine::{generate, run, BearingConfig, GenerateError};
use bearing_ops::{BearingParams, OuterBoundary, SelectionError};
use bearing_types::RegionKind;
use host_kernel::{MemoryHost, Point3};
use proptest::prelude::*;
use test_harness::assertions::*;
use test_harness::helpers::generate_in_memory;
use test_harness::{ProfileOrder, ReorderingHost};

// ── Scenario 1: Default bearing ─────────────────────────────────────────

#[test]
fn default_bearing_end_to_end() {
    let (host, output) = generate_in_memory(BearingParams::default()).unwrap();

    assert!(output.name.contains("70mm OD"));
    assert_single_circle(
        &host,
        output.sketch,
        Point3::new(3.0, -0.5, 0.0),
        0.3025,
        1e-12,
        "default",
    )
    .unwrap();
    assert_two_full_turn_bodies(&host, &output, "default").unwrap();
    assert!(host.messages().is_empty());
}

// ── Scenario 2: Outer boundary styles ───────────────────────────────────

#[test]
fn rectangle_and_four_edges_agree() {
    let params = BearingParams::default();
    let rect = BearingConfig {
        params,
        outer_boundary: OuterBoundary::Rectangle,
    };
    let edges = BearingConfig {
        params,
        outer_boundary: OuterBoundary::FourEdges,
    };
    let out_rect = generate(&rect, &mut MemoryHost::new()).unwrap();
    let out_edges = generate(&edges, &mut MemoryHost::new()).unwrap();
    assert_same_bodies(&out_rect, &out_edges, 1e-9, "boundary styles").unwrap();
}

// ── Scenario 3: Host profile order ──────────────────────────────────────

#[test]
fn profile_order_does_not_change_bodies() {
    let config = BearingConfig::default();
    let baseline = generate(&config, &mut MemoryHost::new()).unwrap();

    for order in [
        ProfileOrder::Reversed,
        ProfileOrder::Rotated(3),
        ProfileOrder::Rotated(7),
    ] {
        let mut host = ReorderingHost::new(MemoryHost::new(), order);
        let output = generate(&config, &mut host).unwrap();
        assert_same_bodies(&baseline, &output, 1e-12, &format!("{order:?}")).unwrap();
        assert_two_full_turn_bodies(&host.inner, &output, &format!("{order:?}")).unwrap();
    }
}

// ── Scenario 4: Selection failures roll back ────────────────────────────

#[test]
fn duplicated_profiles_are_ambiguous() {
    let mut host = ReorderingHost::new(MemoryHost::new(), ProfileOrder::Duplicated);
    let err = run(&BearingConfig::default(), &mut host).unwrap_err();

    assert!(err.is_selection());
    assert!(matches!(
        err,
        GenerateError::Selection(SelectionError::Ambiguous {
            kind: RegionKind::OuterRace,
            ..
        })
    ));
    assert_empty_document(&host.inner, "duplicated").unwrap();
    assert_eq!(host.inner.messages().len(), 1);
}

#[test]
fn missing_profiles_are_reported() {
    let mut host = ReorderingHost::new(MemoryHost::new(), ProfileOrder::Emptied);
    let err = run(&BearingConfig::default(), &mut host).unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Selection(SelectionError::Missing {
            kind: RegionKind::OuterRace
        })
    ));
    assert_empty_document(&host.inner, "emptied").unwrap();
    assert!(host.inner.messages()[0].contains("no profile matches the outer race"));
}

// ── Scenario 5: Parameter variations ────────────────────────────────────

#[test]
fn zero_clearance_bearing() {
    let params = BearingParams {
        divot_clearance: 0.0,
        ..BearingParams::default()
    };
    let (host, output) = generate_in_memory(params).unwrap();
    assert_two_full_turn_bodies(&host, &output, "zero clearance").unwrap();
    // Inner races, outer race and the two halves of the hole.
    assert_eq!(output.profile_count, 5);
}

#[test]
fn level_guide_bearing() {
    let params = BearingParams {
        elevation: 0.0,
        ..BearingParams::default()
    };
    let (host, output) = generate_in_memory(params).unwrap();
    assert_two_full_turn_bodies(&host, &output, "level guide").unwrap();
}

#[test]
fn clearance_widens_channel_and_shrinks_races() {
    let narrow = generate_in_memory(BearingParams {
        divot_clearance: 0.02,
        ..BearingParams::default()
    })
    .unwrap()
    .1;
    let wide = generate_in_memory(BearingParams {
        divot_clearance: 0.2,
        ..BearingParams::default()
    })
    .unwrap()
    .1;
    assert!(wide.total_volume() < narrow.total_volume());
    assert_eq!(narrow.profile_count, wide.profile_count);
}

#[test]
fn larger_bearing_label() {
    let (host, output) = generate_in_memory(BearingParams {
        inner_radius: 10.0,
        horizontal_thickness: 2.5,
        vertical_thickness: 2.0,
        hole_radius: 0.8,
        divot_clearance: 0.1,
        elevation: 0.3,
    })
    .unwrap();
    assert_eq!(output.name, "Roller Bearing 250mm OD");
    assert_single_circle(&host, output.sketch, Point3::planar(11.25, -1.0), 0.8, 1e-12, "large")
        .unwrap();
    assert_two_full_turn_bodies(&host, &output, "large").unwrap();
}

// ── Scenario 6: Volumes follow Pappus ───────────────────────────────────

#[test]
fn race_and_clearance_volumes_fill_the_tube() {
    let (host, output) = generate_in_memory(BearingParams::default()).unwrap();
    let races: f64 = output.total_volume();
    let body_sum: f64 = host
        .component_bodies(output.component)
        .iter()
        .map(|b| b.volume)
        .sum();
    assert_relative_eq!(races, body_sum, epsilon = 1e-9);

    let tube = std::f64::consts::PI * (3.5f64.powi(2) - 2.5f64.powi(2));
    assert!(races < tube);
    // The hole alone sweeps 2π · πR² · 3.0; the channel takes a little more.
    let hole = std::f64::consts::TAU * std::f64::consts::PI * 0.3025f64.powi(2) * 3.0;
    assert!(races < tube - hole + 1e-9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn scaled_bearings_generate(scale in 0.25f64..8.0, up in any::<bool>()) {
        let base = BearingParams::default();
        let params = BearingParams {
            inner_radius: base.inner_radius * scale,
            horizontal_thickness: base.horizontal_thickness * scale,
            vertical_thickness: base.vertical_thickness * scale,
            hole_radius: base.hole_radius * scale,
            divot_clearance: base.divot_clearance * scale,
            elevation: (if up { -base.elevation } else { base.elevation }) * scale,
        };
        let (host, output) = generate_in_memory(params).unwrap();
        prop_assert!(assert_two_full_turn_bodies(&host, &output, "scaled").is_ok());
        prop_assert_eq!(output.profile_count, 11);
    }
}
