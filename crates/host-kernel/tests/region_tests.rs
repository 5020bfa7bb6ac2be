//! Profile extraction through MemoryHost: closed regions of line/circle sketches.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use host_kernel::{ConstructionPlane, MemoryHost, ModelingHost, Point3, Profile, SketchHandle};

/// Helper: a fresh host with one sketch on the XZ plane.
fn sketch_host() -> (MemoryHost, SketchHandle) {
    let mut host = MemoryHost::new();
    let comp = host.add_component().unwrap();
    let plane = host
        .construction_plane(comp, ConstructionPlane::XZ)
        .unwrap();
    let sketch = host.add_sketch(comp, plane).unwrap();
    (host, sketch)
}

fn p(x: f64, y: f64) -> Point3 {
    Point3::planar(x, y)
}

fn by_area(mut profiles: Vec<Profile>) -> Vec<Profile> {
    profiles.sort_by(|a, b| a.area.partial_cmp(&b.area).unwrap());
    profiles
}

#[test]
fn rectangle_is_one_profile() {
    let (mut host, sk) = sketch_host();
    let edges = host
        .add_two_point_rectangle(sk, p(1.0, 0.0), p(3.0, -1.0))
        .unwrap();

    let profiles = host.profiles(sk).unwrap();
    assert_eq!(profiles.len(), 1);
    let prof = &profiles[0];
    assert_relative_eq!(prof.area, 2.0, epsilon = 1e-12);
    assert_relative_eq!(prof.centroid.x, 2.0, epsilon = 1e-12);
    assert_relative_eq!(prof.centroid.y, -0.5, epsilon = 1e-12);
    assert!(prof.is_bounded_by_all(&edges));
    assert!(!prof.has_holes());
}

#[test]
fn four_explicit_edges_match_rectangle_primitive() {
    let (mut host, sk) = sketch_host();
    host.add_line(sk, p(0.0, 0.0), p(2.0, 0.0)).unwrap();
    host.add_line(sk, p(2.0, 0.0), p(2.0, 1.0)).unwrap();
    host.add_line(sk, p(2.0, 1.0), p(0.0, 1.0)).unwrap();
    host.add_line(sk, p(0.0, 1.0), p(0.0, 0.0)).unwrap();

    let profiles = host.profiles(sk).unwrap();
    assert_eq!(profiles.len(), 1);
    assert_relative_eq!(profiles[0].area, 2.0, epsilon = 1e-12);
}

#[test]
fn floating_circle_punches_a_hole() {
    let (mut host, sk) = sketch_host();
    host.add_two_point_rectangle(sk, p(0.0, 0.0), p(4.0, 2.0))
        .unwrap();
    let circle = host.add_circle(sk, p(2.0, 1.0), 0.5).unwrap();

    let profiles = by_area(host.profiles(sk).unwrap());
    assert_eq!(profiles.len(), 2, "disk + annulus");

    let disk = &profiles[0];
    assert_relative_eq!(disk.area, PI * 0.25, epsilon = 1e-9);
    assert_relative_eq!(disk.centroid.x, 2.0, epsilon = 1e-9);
    assert_relative_eq!(disk.centroid.y, 1.0, epsilon = 1e-9);
    assert_eq!(disk.curves, vec![circle]);

    let plate = &profiles[1];
    assert_eq!(plate.loop_count, 2);
    assert!(plate.is_bounded_by(circle));
    assert_relative_eq!(plate.area, 8.0 - PI * 0.25, epsilon = 1e-9);
    assert_relative_eq!(plate.centroid.x, 2.0, epsilon = 1e-9);
}

#[test]
fn t_junction_line_splits_rectangle() {
    let (mut host, sk) = sketch_host();
    host.add_two_point_rectangle(sk, p(0.0, 0.0), p(3.0, 1.0))
        .unwrap();
    let divider = host.add_line(sk, p(1.0, 0.0), p(1.0, 1.0)).unwrap();

    let profiles = by_area(host.profiles(sk).unwrap());
    assert_eq!(profiles.len(), 2);
    assert_relative_eq!(profiles[0].area, 1.0, epsilon = 1e-12);
    assert_relative_eq!(profiles[1].area, 2.0, epsilon = 1e-12);
    assert!(profiles.iter().all(|pr| pr.is_bounded_by(divider)));
}

#[test]
fn dangling_lines_enclose_nothing() {
    let (mut host, sk) = sketch_host();
    host.add_line(sk, p(0.0, 0.0), p(2.5, 0.0)).unwrap();
    host.add_line(sk, p(0.0, 0.0), p(0.0, -1.0)).unwrap();

    assert!(host.profiles(sk).unwrap().is_empty());
}

#[test]
fn dangling_spur_does_not_change_area() {
    let (mut host, sk) = sketch_host();
    host.add_two_point_rectangle(sk, p(0.0, 0.0), p(2.0, 2.0))
        .unwrap();
    // Spur from the left edge into the interior.
    host.add_line(sk, p(0.0, 1.0), p(1.0, 1.0)).unwrap();

    let profiles = host.profiles(sk).unwrap();
    assert_eq!(profiles.len(), 1);
    assert_relative_eq!(profiles[0].area, 4.0, epsilon = 1e-12);
}

#[test]
fn diameter_halves_a_circle() {
    let (mut host, sk) = sketch_host();
    host.add_circle(sk, p(0.0, 0.0), 1.0).unwrap();
    host.add_line(sk, p(0.0, -1.5), p(0.0, 1.5)).unwrap();

    let mut profiles = host.profiles(sk).unwrap();
    assert_eq!(profiles.len(), 2);
    profiles.sort_by(|a, b| a.centroid.x.partial_cmp(&b.centroid.x).unwrap());

    let expected_x = 4.0 / (3.0 * PI);
    for (prof, sign) in profiles.iter().zip([-1.0, 1.0]) {
        assert_relative_eq!(prof.area, PI / 2.0, epsilon = 1e-9);
        assert_relative_eq!(prof.centroid.x, sign * expected_x, epsilon = 1e-9);
        assert_relative_eq!(prof.centroid.y, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn line_ending_on_circle_is_welded() {
    let (mut host, sk) = sketch_host();
    host.add_circle(sk, p(3.0, -0.5), 0.3025).unwrap();
    host.add_line(sk, p(3.0, 0.0), p(3.0, -1.0)).unwrap();
    // Ends exactly at the leftmost point of the circle.
    host.add_line(sk, p(2.5, -0.5), p(3.0 - 0.3025, -0.5))
        .unwrap();

    let profiles = host.profiles(sk).unwrap();
    assert_eq!(profiles.len(), 2, "spur touching the circle adds no region");
    let total: f64 = profiles.iter().map(|pr| pr.area).sum();
    assert_relative_eq!(total, PI * 0.3025 * 0.3025, epsilon = 1e-9);
}

#[test]
fn adding_a_curve_recomputes_profiles() {
    let (mut host, sk) = sketch_host();
    host.add_two_point_rectangle(sk, p(0.0, 0.0), p(2.0, 1.0))
        .unwrap();
    assert_eq!(host.profiles(sk).unwrap().len(), 1);

    host.add_line(sk, p(1.0, 0.0), p(1.0, 1.0)).unwrap();
    assert_eq!(host.profiles(sk).unwrap().len(), 2);
}
