use std::cmp::Ordering;

use bearing_types::CurveHandle;

use crate::arrangement::{cross, sub, Arrangement, EdgeShape, Vec2};
use crate::types::Tolerance;

/// A closed region found in an arrangement.
#[derive(Debug, Clone)]
pub struct Region {
    /// Boundary loops as half-edge indices. The first loop is the outer one.
    pub loops: Vec<Vec<usize>>,
    /// Flattened boundary of each loop, in the same order as `loops`.
    pub outlines: Vec<Vec<Vec2>>,
    /// Sketch curves on the boundary, sorted and deduplicated.
    pub sources: Vec<CurveHandle>,
    /// Enclosed area with holes removed.
    pub area: f64,
    pub centroid: Vec2,
}

/// A closed half-edge cycle with its signed integrals.
struct Cycle {
    half_edges: Vec<usize>,
    component: usize,
    area: f64,
    moment_x: f64,
    moment_y: f64,
    outline: Vec<Vec2>,
}

/// Extract the bounded regions of an arrangement.
///
/// Uses minimal face detection over a half-edge graph:
/// 1. Each edge yields two half-edges; half-edge `2e` runs start→end, `2e + 1` end→start
/// 2. Outgoing half-edges at each vertex are sorted counter-clockwise by
///    departure tangent, ties broken by curvature
/// 3. Following the next clockwise half-edge after the twin traces every face
///    with its interior on the left, so bounded faces have positive area
/// 4. Negative cycles are outer boundaries of connected components; each is
///    attached as a hole to the smallest bounded face of another component
///    that contains it
/// 5. Zero-area cycles (trees of dangling curves) are dropped
pub fn extract_regions(arr: &Arrangement, tol: &Tolerance) -> Vec<Region> {
    let half_edge_count = arr.edges.len() * 2;
    if half_edge_count == 0 {
        return Vec::new();
    }

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); arr.vertices.len()];
    for h in 0..half_edge_count {
        outgoing[origin(arr, h)].push(h);
    }
    for list in outgoing.iter_mut() {
        list.sort_by(|&a, &b| {
            let (angle_a, curv_a) = departure(arr, a);
            let (angle_b, curv_b) = departure(arr, b);
            angle_a
                .partial_cmp(&angle_b)
                .unwrap_or(Ordering::Equal)
                .then(curv_a.partial_cmp(&curv_b).unwrap_or(Ordering::Equal))
        });
    }
    let mut slot = vec![0usize; half_edge_count];
    for list in &outgoing {
        for (i, &h) in list.iter().enumerate() {
            slot[h] = i;
        }
    }

    let next = |h: usize| -> usize {
        let twin = h ^ 1;
        let list = &outgoing[origin(arr, twin)];
        list[(slot[twin] + list.len() - 1) % list.len()]
    };

    let components = connected_components(arr);

    let mut visited = vec![false; half_edge_count];
    let mut cycles = Vec::new();
    for start in 0..half_edge_count {
        if visited[start] {
            continue;
        }
        let mut half_edges = Vec::new();
        let mut h = start;
        while !visited[h] {
            visited[h] = true;
            half_edges.push(h);
            h = next(h);
        }
        cycles.push(make_cycle(arr, half_edges, &components, tol));
    }

    let bounded: Vec<usize> = (0..cycles.len())
        .filter(|&i| cycles[i].area > tol.area)
        .collect();
    let mut holes: Vec<Vec<usize>> = vec![Vec::new(); cycles.len()];
    for (i, cycle) in cycles.iter().enumerate() {
        if cycle.area >= -tol.area {
            continue;
        }
        let probe = arr.vertices[origin(arr, cycle.half_edges[0])];
        let host = bounded
            .iter()
            .copied()
            .filter(|&b| cycles[b].component != cycle.component)
            .filter(|&b| point_in_polygon(probe, &cycles[b].outline))
            .min_by(|&a, &b| {
                cycles[a]
                    .area
                    .partial_cmp(&cycles[b].area)
                    .unwrap_or(Ordering::Equal)
            });
        if let Some(host) = host {
            holes[host].push(i);
        }
    }

    bounded
        .into_iter()
        .map(|b| {
            let members: Vec<&Cycle> = std::iter::once(&cycles[b])
                .chain(holes[b].iter().map(|&h| &cycles[h]))
                .collect();
            let area: f64 = members.iter().map(|c| c.area).sum();
            let moment_x: f64 = members.iter().map(|c| c.moment_x).sum();
            let moment_y: f64 = members.iter().map(|c| c.moment_y).sum();

            let mut sources: Vec<CurveHandle> = members
                .iter()
                .flat_map(|c| c.half_edges.iter())
                .flat_map(|&h| arr.edges[h / 2].sources.iter().copied())
                .collect();
            sources.sort_unstable();
            sources.dedup();

            Region {
                loops: members.iter().map(|c| c.half_edges.clone()).collect(),
                outlines: members.iter().map(|c| c.outline.clone()).collect(),
                sources,
                area,
                centroid: [moment_x / area, moment_y / area],
            }
        })
        .collect()
}

fn make_cycle(
    arr: &Arrangement,
    half_edges: Vec<usize>,
    components: &[usize],
    tol: &Tolerance,
) -> Cycle {
    let mut area = 0.0;
    let mut moment_x = 0.0;
    let mut moment_y = 0.0;
    let mut outline = Vec::new();
    for &h in &half_edges {
        let [a, mx, my] = integrals(arr, h);
        area += a;
        moment_x += mx;
        moment_y += my;
        flatten(arr, h, tol.chord_angle, &mut outline);
    }
    Cycle {
        component: components[origin(arr, half_edges[0])],
        half_edges,
        area,
        moment_x,
        moment_y,
        outline,
    }
}

pub(crate) fn origin(arr: &Arrangement, h: usize) -> usize {
    let edge = &arr.edges[h / 2];
    if h % 2 == 0 {
        edge.start
    } else {
        edge.end
    }
}

fn destination(arr: &Arrangement, h: usize) -> usize {
    origin(arr, h ^ 1)
}

/// Parameter range `(t0, t1)` of an arc half-edge.
fn arc_range(start_angle: f64, sweep: f64, forward: bool) -> (f64, f64) {
    if forward {
        (start_angle, start_angle + sweep)
    } else {
        (start_angle + sweep, start_angle)
    }
}

/// Departure angle and signed curvature of a half-edge at its origin.
fn departure(arr: &Arrangement, h: usize) -> (f64, f64) {
    let edge = &arr.edges[h / 2];
    match edge.shape {
        EdgeShape::Segment => {
            let d = sub(
                arr.vertices[destination(arr, h)],
                arr.vertices[origin(arr, h)],
            );
            (d[1].atan2(d[0]), 0.0)
        }
        EdgeShape::Arc {
            radius,
            start_angle,
            sweep,
            ..
        } => {
            let (t0, t1) = arc_range(start_angle, sweep, h % 2 == 0);
            let sign = (t1 - t0).signum();
            let dir = [-t0.sin() * sign, t0.cos() * sign];
            (dir[1].atan2(dir[0]), sign / radius)
        }
    }
}

/// Green's theorem contributions `[area, ∫∫x dA, ∫∫y dA]` of one half-edge.
fn integrals(arr: &Arrangement, h: usize) -> [f64; 3] {
    let edge = &arr.edges[h / 2];
    match edge.shape {
        EdgeShape::Segment => {
            let [x0, y0] = arr.vertices[origin(arr, h)];
            let [x1, y1] = arr.vertices[destination(arr, h)];
            [
                (x0 * y1 - x1 * y0) / 2.0,
                (y1 - y0) * (x0 * x0 + x0 * x1 + x1 * x1) / 6.0,
                -(x1 - x0) * (y0 * y0 + y0 * y1 + y1 * y1) / 6.0,
            ]
        }
        EdgeShape::Arc {
            center: [cx, cy],
            radius: r,
            start_angle,
            sweep,
        } => {
            let (t0, t1) = arc_range(start_angle, sweep, h % 2 == 0);
            let area = |t: f64| r * cx * t.sin() - r * cy * t.cos() + r * r * t;
            let mx = |t: f64| {
                let s = t.sin();
                r * (cx * cx * s
                    + 2.0 * cx * r * (t / 2.0 + (2.0 * t).sin() / 4.0)
                    + r * r * (s - s * s * s / 3.0))
            };
            let my = |t: f64| {
                let c = t.cos();
                r * (-cy * cy * c
                    + 2.0 * cy * r * (t / 2.0 - (2.0 * t).sin() / 4.0)
                    + r * r * (-c + c * c * c / 3.0))
            };
            [
                (area(t1) - area(t0)) / 2.0,
                (mx(t1) - mx(t0)) / 2.0,
                (my(t1) - my(t0)) / 2.0,
            ]
        }
    }
}

/// Append the polyline of a half-edge, excluding its destination point.
fn flatten(arr: &Arrangement, h: usize, chord_angle: f64, out: &mut Vec<Vec2>) {
    out.push(arr.vertices[origin(arr, h)]);
    if let EdgeShape::Arc {
        center,
        radius,
        start_angle,
        sweep,
    } = arr.edges[h / 2].shape
    {
        let (t0, t1) = arc_range(start_angle, sweep, h % 2 == 0);
        let steps = ((sweep / chord_angle).ceil() as usize).max(1);
        for k in 1..steps {
            let t = t0 + (t1 - t0) * k as f64 / steps as f64;
            out.push([center[0] + radius * t.cos(), center[1] + radius * t.sin()]);
        }
    }
}

/// Even-odd ray casting.
pub(crate) fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if (a[1] > p[1]) != (b[1] > p[1]) {
            let x = a[0] + (p[1] - a[1]) / (b[1] - a[1]) * (b[0] - a[0]);
            if p[0] < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Label every vertex with the root of its connected component.
fn connected_components(arr: &Arrangement) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..arr.vertices.len()).collect();

    fn find(parent: &mut [usize], mut v: usize) -> usize {
        while parent[v] != v {
            parent[v] = parent[parent[v]];
            v = parent[v];
        }
        v
    }

    for edge in &arr.edges {
        let a = find(&mut parent, edge.start);
        let b = find(&mut parent, edge.end);
        if a != b {
            parent[a] = b;
        }
    }
    (0..arr.vertices.len())
        .map(|v| find(&mut parent, v))
        .collect()
}

/// Signed distance of `p` from the line through `a` and `b`.
pub(crate) fn signed_distance(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let d = sub(b, a);
    let len = (d[0] * d[0] + d[1] * d[1]).sqrt();
    cross(d, sub(p, a)) / len
}
