use serde::{Deserialize, Serialize};

/// A point in sketch space. Sketch geometry lives on `z = 0`.
/// Lengths are centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point on the sketch plane.
    pub const fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// True when all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Geometry of a sketch curve as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CurveGeometry {
    Line { start: Point3, end: Point3 },
    Circle { center: Point3, radius: f64 },
}

impl CurveGeometry {
    pub fn is_circle(&self) -> bool {
        matches!(self, CurveGeometry::Circle { .. })
    }

    /// Arc length of the curve.
    pub fn length(&self) -> f64 {
        match self {
            CurveGeometry::Line { start, end } => start.distance_to(end),
            CurveGeometry::Circle { radius, .. } => std::f64::consts::TAU * radius,
        }
    }
}
