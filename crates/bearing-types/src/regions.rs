use std::fmt;

use serde::{Deserialize, Serialize};

/// What a profile of the bearing cross-section represents.
/// Assigned by boundary membership, never by list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RegionKind {
    /// The ring bounded by the outer edge of the section.
    OuterRace,
    /// The part of the inner ring on the top side of the elevation guide.
    InnerRaceTop,
    /// The part of the inner ring on the bottom side of the elevation guide.
    InnerRaceBottom,
    /// Channel and hole pieces that are not revolved.
    Clearance,
}

impl RegionKind {
    /// Region kinds that must each be matched by exactly one profile.
    pub const RACES: [RegionKind; 3] = [
        RegionKind::OuterRace,
        RegionKind::InnerRaceTop,
        RegionKind::InnerRaceBottom,
    ];
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionKind::OuterRace => "outer race",
            RegionKind::InnerRaceTop => "inner race (top)",
            RegionKind::InnerRaceBottom => "inner race (bottom)",
            RegionKind::Clearance => "clearance",
        };
        f.write_str(name)
    }
}
