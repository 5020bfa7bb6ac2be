use serde::{Deserialize, Serialize};

use crate::geom::Point3;
use crate::handles::{CurveHandle, ProfileId};

/// A closed region of a sketch, eligible for revolution.
///
/// Profiles are computed by the host. Their order in a profile list carries
/// no meaning; identify them by what bounds them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Host-assigned id, valid until the sketch is modified.
    pub id: ProfileId,
    /// Every sketch curve contributing a piece of the boundary, in no
    /// particular order.
    pub curves: Vec<CurveHandle>,
    /// Number of boundary loops (1 + number of holes).
    pub loop_count: usize,
    /// Enclosed area (holes subtracted), always positive.
    pub area: f64,
    /// Area centroid.
    pub centroid: Point3,
}

impl Profile {
    /// Whether `curve` contributes to this profile's boundary.
    pub fn is_bounded_by(&self, curve: CurveHandle) -> bool {
        self.curves.contains(&curve)
    }

    /// Whether every curve in `curves` contributes to the boundary.
    pub fn is_bounded_by_all(&self, curves: &[CurveHandle]) -> bool {
        curves.iter().all(|c| self.is_bounded_by(*c))
    }

    pub fn has_holes(&self) -> bool {
        self.loop_count > 1
    }
}
