//! Planar arrangement of sketch curves.
//!
//! Every curve is split at its intersections with every other curve and
//! coincident points are welded, so edges of the resulting graph only meet
//! at their endpoints. Region extraction walks this graph.

use std::f64::consts::TAU;

use bearing_types::{CurveGeometry, CurveHandle};

/// A 2D point or vector in sketch coordinates.
pub type Vec2 = [f64; 2];

/// Shape of an arrangement edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeShape {
    /// Straight segment between the edge's vertices.
    Segment,
    /// Counter-clockwise arc from the start vertex to the end vertex.
    /// A sweep of a full turn means start and end coincide.
    Arc {
        center: Vec2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

/// An edge of the arrangement.
#[derive(Debug, Clone)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
    pub shape: EdgeShape,
    /// Sketch curves this edge is a piece of. More than one when curves overlap.
    pub sources: Vec<CurveHandle>,
}

/// Vertex/edge graph of a sketch.
#[derive(Debug, Clone, Default)]
pub struct Arrangement {
    pub vertices: Vec<Vec2>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Copy)]
enum Primitive {
    Segment { a: Vec2, b: Vec2 },
    Circle { center: Vec2, radius: f64 },
}

impl From<&CurveGeometry> for Primitive {
    fn from(geometry: &CurveGeometry) -> Self {
        match geometry {
            CurveGeometry::Line { start, end } => Primitive::Segment {
                a: [start.x, start.y],
                b: [end.x, end.y],
            },
            CurveGeometry::Circle { center, radius } => Primitive::Circle {
                center: [center.x, center.y],
                radius: *radius,
            },
        }
    }
}

/// Build the arrangement of `curves`. Points within `tol` of each other weld.
pub fn build(curves: &[(CurveHandle, CurveGeometry)], tol: f64) -> Arrangement {
    let primitives: Vec<Primitive> = curves.iter().map(|(_, g)| Primitive::from(g)).collect();
    let mut arr = Arrangement::default();
    let mut on_curve: Vec<Vec<usize>> = vec![Vec::new(); primitives.len()];

    // Endpoints first, so intersections snap onto them.
    for (i, prim) in primitives.iter().enumerate() {
        if let Primitive::Segment { a, b } = prim {
            let va = arr.weld(*a, tol);
            let vb = arr.weld(*b, tol);
            on_curve[i].push(va);
            on_curve[i].push(vb);
        }
    }

    for i in 0..primitives.len() {
        for j in (i + 1)..primitives.len() {
            for p in intersect(&primitives[i], &primitives[j], tol) {
                let v = arr.weld(p, tol);
                on_curve[i].push(v);
                on_curve[j].push(v);
            }
        }
    }

    for (i, (handle, _)) in curves.iter().enumerate() {
        match primitives[i] {
            Primitive::Segment { a, b } => arr.split_segment(*handle, a, b, &on_curve[i]),
            Primitive::Circle { center, radius } => {
                arr.split_circle(*handle, center, radius, &on_curve[i], tol)
            }
        }
    }

    arr
}

impl Arrangement {
    /// Return the vertex at `p`, creating it if no vertex lies within `tol`.
    fn weld(&mut self, p: Vec2, tol: f64) -> usize {
        if let Some(idx) = self.vertices.iter().position(|v| dist(*v, p) <= tol) {
            return idx;
        }
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    fn split_segment(&mut self, source: CurveHandle, a: Vec2, b: Vec2, on_curve: &[usize]) {
        let r = sub(b, a);
        let len2 = dot(r, r);
        let mut stops: Vec<(f64, usize)> = on_curve
            .iter()
            .map(|&v| (dot(sub(self.vertices[v], a), r) / len2, v))
            .collect();
        stops.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
        stops.dedup_by_key(|s| s.1);

        for pair in stops.windows(2) {
            let (start, end) = (pair[0].1, pair[1].1);
            if start != end {
                self.push_edge(source, start, end, EdgeShape::Segment, 0.0);
            }
        }
    }

    fn split_circle(
        &mut self,
        source: CurveHandle,
        center: Vec2,
        radius: f64,
        on_curve: &[usize],
        tol: f64,
    ) {
        let mut ids: Vec<usize> = on_curve.to_vec();
        if ids.is_empty() {
            ids.push(self.weld([center[0] + radius, center[1]], tol));
        }
        ids.sort_unstable();
        ids.dedup();

        let mut stops: Vec<(f64, usize)> = ids
            .into_iter()
            .map(|v| {
                let d = sub(self.vertices[v], center);
                (d[1].atan2(d[0]).rem_euclid(TAU), v)
            })
            .collect();
        stops.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));

        let n = stops.len();
        for k in 0..n {
            let (angle, start) = stops[k];
            let (next_angle, end) = stops[(k + 1) % n];
            let sweep = if n == 1 {
                TAU
            } else if k + 1 < n {
                next_angle - angle
            } else {
                next_angle + TAU - angle
            };
            if sweep <= 0.0 {
                continue;
            }
            let shape = EdgeShape::Arc {
                center,
                radius,
                start_angle: angle,
                sweep,
            };
            self.push_edge(source, start, end, shape, tol);
        }
    }

    /// Add an edge, merging it into an existing identical edge if there is one.
    fn push_edge(&mut self, source: CurveHandle, start: usize, end: usize, shape: EdgeShape, tol: f64) {
        let duplicate = self.edges.iter_mut().find(|e| match (e.shape, shape) {
            (EdgeShape::Segment, EdgeShape::Segment) => {
                (e.start == start && e.end == end) || (e.start == end && e.end == start)
            }
            (
                EdgeShape::Arc {
                    center: c1,
                    radius: r1,
                    ..
                },
                EdgeShape::Arc {
                    center: c2,
                    radius: r2,
                    ..
                },
            ) => {
                e.start == start
                    && e.end == end
                    && dist(c1, c2) <= tol
                    && (r1 - r2).abs() <= tol
            }
            _ => false,
        });

        match duplicate {
            Some(edge) => {
                if !edge.sources.contains(&source) {
                    edge.sources.push(source);
                }
            }
            None => self.edges.push(Edge {
                start,
                end,
                shape,
                sources: vec![source],
            }),
        }
    }
}

fn intersect(p: &Primitive, q: &Primitive, tol: f64) -> Vec<Vec2> {
    match (p, q) {
        (Primitive::Segment { a, b }, Primitive::Segment { a: c, b: d }) => {
            segment_segment(*a, *b, *c, *d, tol)
        }
        (Primitive::Segment { a, b }, Primitive::Circle { center, radius })
        | (Primitive::Circle { center, radius }, Primitive::Segment { a, b }) => {
            segment_circle(*a, *b, *center, *radius, tol)
        }
        (
            Primitive::Circle {
                center: c1,
                radius: r1,
            },
            Primitive::Circle {
                center: c2,
                radius: r2,
            },
        ) => circle_circle(*c1, *r1, *c2, *r2, tol),
    }
}

fn segment_segment(a: Vec2, b: Vec2, c: Vec2, d: Vec2, tol: f64) -> Vec<Vec2> {
    let r = sub(b, a);
    let s = sub(d, c);
    let len_r = norm(r);
    let len_s = norm(s);
    let qp = sub(c, a);
    let denom = cross(r, s);

    if denom.abs() <= 1e-12 * len_r * len_s {
        // Parallel: only collinear overlaps produce shared points.
        if cross(qp, r).abs() / len_r > tol {
            return Vec::new();
        }
        let mut points = Vec::new();
        for p in [c, d] {
            if on_segment(p, a, b, tol) {
                points.push(p);
            }
        }
        for p in [a, b] {
            if on_segment(p, c, d, tol) {
                points.push(p);
            }
        }
        return points;
    }

    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    let et = tol / len_r;
    let eu = tol / len_s;
    if (-et..=1.0 + et).contains(&t) && (-eu..=1.0 + eu).contains(&u) {
        let t = t.clamp(0.0, 1.0);
        vec![[a[0] + r[0] * t, a[1] + r[1] * t]]
    } else {
        Vec::new()
    }
}

fn segment_circle(a: Vec2, b: Vec2, center: Vec2, radius: f64, tol: f64) -> Vec<Vec2> {
    let r = sub(b, a);
    let len = norm(r);
    let dir = [r[0] / len, r[1] / len];
    let f = sub(center, a);
    let along = dot(f, dir);
    let off = cross(dir, f).abs();
    if off > radius + tol {
        return Vec::new();
    }

    let half = if off >= radius {
        0.0
    } else {
        (radius * radius - off * off).sqrt()
    };
    let stations = if half <= tol {
        vec![along]
    } else {
        vec![along - half, along + half]
    };

    stations
        .into_iter()
        .filter(|s| (-tol..=len + tol).contains(s))
        .map(|s| [a[0] + dir[0] * s, a[1] + dir[1] * s])
        .collect()
}

fn circle_circle(c1: Vec2, r1: f64, c2: Vec2, r2: f64, tol: f64) -> Vec<Vec2> {
    let d = dist(c1, c2);
    if d <= tol || d > r1 + r2 + tol || d < (r1 - r2).abs() - tol {
        return Vec::new();
    }
    let a = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let e = [(c2[0] - c1[0]) / d, (c2[1] - c1[1]) / d];
    let base = [c1[0] + e[0] * a, c1[1] + e[1] * a];
    if h <= tol {
        vec![base]
    } else {
        vec![
            [base[0] - e[1] * h, base[1] + e[0] * h],
            [base[0] + e[1] * h, base[1] - e[0] * h],
        ]
    }
}

fn on_segment(p: Vec2, a: Vec2, b: Vec2, tol: f64) -> bool {
    let r = sub(b, a);
    let len = norm(r);
    let t = dot(sub(p, a), r) / (len * len);
    let e = tol / len;
    (-e..=1.0 + e).contains(&t) && cross(sub(p, a), r).abs() / len <= tol
}

pub(crate) fn sub(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] - b[0], a[1] - b[1]]
}

pub(crate) fn dot(a: Vec2, b: Vec2) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

pub(crate) fn cross(a: Vec2, b: Vec2) -> f64 {
    a[0] * b[1] - a[1] * b[0]
}

pub(crate) fn norm(a: Vec2) -> f64 {
    dot(a, a).sqrt()
}

pub(crate) fn dist(a: Vec2, b: Vec2) -> f64 {
    norm(sub(a, b))
}
