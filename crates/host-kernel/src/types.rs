use std::fmt;

use serde::{Deserialize, Serialize};

// Re-export shared types from bearing-types
pub use bearing_types::{
    BodyHandle, ComponentHandle, ConstructionPlane, CurveHandle, PlaneHandle, Point3, Profile,
    ProfileId, SketchHandle,
};

/// How a new feature combines with existing bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureOperation {
    /// Create an independent solid body.
    NewBody,
    /// Merge into the body the profile touches.
    Join,
    /// Remove material from existing bodies.
    Cut,
}

/// Everything the host needs to create a revolve feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevolveInput {
    /// Sketch the profiles belong to.
    pub sketch: SketchHandle,
    /// Profiles swept together into one feature.
    pub profiles: Vec<ProfileId>,
    /// Sketch line used as the rotation axis.
    pub axis: CurveHandle,
    /// Angular extent in radians.
    pub angle: f64,
    pub operation: FeatureOperation,
}

impl RevolveInput {
    /// A full-turn revolve creating a new body.
    pub fn full_turn(sketch: SketchHandle, profiles: Vec<ProfileId>, axis: CurveHandle) -> Self {
        Self {
            sketch,
            profiles,
            axis,
            angle: std::f64::consts::TAU,
            operation: FeatureOperation::NewBody,
        }
    }
}

/// The kinds of host call, used for call accounting and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostCall {
    AddComponent,
    SetComponentName,
    AddSketch,
    AddLine,
    AddRectangle,
    AddCircle,
    Offset,
    Profiles,
    Revolve,
    DeleteBody,
    DeleteSketch,
    DeleteComponent,
}

impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Errors raised by the modeling host.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    #[error("entity not found: {entity}")]
    EntityNotFound { entity: String },

    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("offset failed: {reason}")]
    OffsetFailed { reason: String },

    #[error("revolve failed: {reason}")]
    RevolveFailed { reason: String },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("injected failure on {call} call #{occurrence}")]
    Injected { call: HostCall, occurrence: usize },
}

impl HostError {
    pub(crate) fn not_found(entity: impl fmt::Display) -> Self {
        HostError::EntityNotFound {
            entity: entity.to_string(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        HostError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Tolerances used by the in-memory host.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are the same sketch point (cm).
    pub weld: f64,
    /// Regions with less area than this are degenerate (cm²).
    pub area: f64,
    /// Maximum angle subtended by one chord when arcs are flattened (radians).
    pub chord_angle: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            weld: 1e-9,
            area: 1e-12,
            chord_angle: std::f64::consts::PI / 64.0,
        }
    }
}
