use bearing_types::{ProfileId, RegionKind};
use host_kernel::HostError;

/// Why the section's profiles could not be mapped onto the races.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("no profile matches the {kind}")]
    Missing { kind: RegionKind },

    #[error("{} profiles match the {kind}: {profiles:?}", profiles.len())]
    Ambiguous {
        kind: RegionKind,
        profiles: Vec<ProfileId>,
    },
}

/// Errors from bearing modeling operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OpError {
    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("profile selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("offset of {curve} produced {produced} curves, expected 1")]
    UnexpectedOffset {
        curve: bearing_types::CurveHandle,
        produced: usize,
    },
}
