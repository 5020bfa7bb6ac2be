use bearing_ops::{OpError, SelectionError, ValidationError};
use bearing_types::{BodyHandle, ComponentHandle, ProfileId, RegionKind, SketchHandle};
use host_kernel::HostError;
use serde::{Deserialize, Serialize};

/// Report of a successful generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingOutput {
    pub component: ComponentHandle,
    pub name: String,
    pub sketch: SketchHandle,
    /// Number of closed profiles the host found in the section.
    pub profile_count: usize,
    /// Every profile with the region it was classified as.
    pub regions: Vec<(ProfileId, RegionKind)>,
    pub bodies: Vec<BodyReport>,
}

impl BearingOutput {
    pub fn total_volume(&self) -> f64 {
        self.bodies.iter().map(|b| b.volume).sum()
    }
}

/// One revolve feature's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyReport {
    pub handle: BodyHandle,
    pub profiles: Vec<ProfileId>,
    pub kinds: Vec<RegionKind>,
    pub angle: f64,
    /// Swept volume in cm³, from the profiles' area and centroid.
    pub volume: f64,
}

/// Errors from a generation run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("profile selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("{cause}\nrollback also failed: {rollback}")]
    Rollback {
        cause: Box<GenerateError>,
        rollback: HostError,
    },
}

impl GenerateError {
    pub fn is_validation(&self) -> bool {
        match self {
            GenerateError::Validation(_) => true,
            GenerateError::Rollback { cause, .. } => cause.is_validation(),
            _ => false,
        }
    }

    pub fn is_host(&self) -> bool {
        match self {
            GenerateError::Host(_) => true,
            GenerateError::Rollback { cause, .. } => cause.is_host(),
            _ => false,
        }
    }

    pub fn is_selection(&self) -> bool {
        match self {
            GenerateError::Selection(_) => true,
            GenerateError::Rollback { cause, .. } => cause.is_selection(),
            _ => false,
        }
    }
}

impl From<OpError> for GenerateError {
    fn from(err: OpError) -> Self {
        match err {
            OpError::Host(e) => GenerateError::Host(e),
            OpError::Selection(e) => GenerateError::Selection(e),
            OpError::UnexpectedOffset { curve, produced } => {
                GenerateError::Host(HostError::OffsetFailed {
                    reason: format!("offset of {curve} produced {produced} curves"),
                })
            }
        }
    }
}
