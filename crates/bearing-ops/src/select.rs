//! Mapping host profiles onto bearing regions.
//!
//! Hosts return profiles in no particular order, so each profile is
//! classified by which section edges bound it.

use bearing_types::{Profile, ProfileId, RegionKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sketch::BearingCurves;
use crate::types::SelectionError;

/// The three race profiles, plus the classification of every profile seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedProfiles {
    pub outer_race: ProfileId,
    pub inner_top: ProfileId,
    pub inner_bottom: ProfileId,
    pub classified: Vec<(ProfileId, RegionKind)>,
}

fn satisfies(profile: &Profile, curves: &BearingCurves, kind: RegionKind) -> bool {
    match kind {
        RegionKind::OuterRace => profile.is_bounded_by(curves.outer),
        RegionKind::InnerRaceTop => profile.is_bounded_by_all(&[curves.inner, curves.top]),
        RegionKind::InnerRaceBottom => profile.is_bounded_by_all(&[curves.inner, curves.bottom]),
        RegionKind::Clearance => false,
    }
}

/// Classify one profile. A profile matching more than one race predicate
/// is reported as ambiguous for the first race it matched.
pub fn classify(profile: &Profile, curves: &BearingCurves) -> Result<RegionKind, SelectionError> {
    let mut hits = RegionKind::RACES
        .into_iter()
        .filter(|kind| satisfies(profile, curves, *kind));
    match (hits.next(), hits.next()) {
        (None, _) => Ok(RegionKind::Clearance),
        (Some(kind), None) => Ok(kind),
        (Some(kind), Some(_)) => Err(SelectionError::Ambiguous {
            kind,
            profiles: vec![profile.id],
        }),
    }
}

/// Pick the unique profile for each race.
pub fn select_profiles(
    profiles: &[Profile],
    curves: &BearingCurves,
) -> Result<SelectedProfiles, SelectionError> {
    let mut classified = Vec::with_capacity(profiles.len());
    for profile in profiles {
        classified.push((profile.id, classify(profile, curves)?));
    }
    classified.sort_by_key(|(id, _)| *id);

    let unique = |kind: RegionKind| -> Result<ProfileId, SelectionError> {
        let found: Vec<ProfileId> = classified
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(id, _)| *id)
            .collect();
        match found.as_slice() {
            [] => Err(SelectionError::Missing { kind }),
            [id] => Ok(*id),
            _ => Err(SelectionError::Ambiguous {
                kind,
                profiles: found,
            }),
        }
    };

    let selected = SelectedProfiles {
        outer_race: unique(RegionKind::OuterRace)?,
        inner_top: unique(RegionKind::InnerRaceTop)?,
        inner_bottom: unique(RegionKind::InnerRaceBottom)?,
        classified,
    };
    debug!(
        profiles = profiles.len(),
        outer = %selected.outer_race,
        inner_top = %selected.inner_top,
        inner_bottom = %selected.inner_bottom,
        "profiles selected"
    );
    Ok(selected)
}
