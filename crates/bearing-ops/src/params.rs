//! Bearing parameters and their validation.

use serde::{Deserialize, Serialize};

/// The six dimensions that define a bearing cross-section.
///
/// Lengths are centimeters. The section is drawn on the XZ plane with the
/// revolve axis on the sketch's y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BearingParams {
    /// Distance from the revolve axis to the inner face of the bearing.
    pub inner_radius: f64,
    /// Radial width of the section.
    pub horizontal_thickness: f64,
    /// Axial height of the section.
    pub vertical_thickness: f64,
    /// Radius of the rolling-element hole in the middle of the section.
    pub hole_radius: f64,
    /// Width of the channel splitting the inner and outer race.
    pub divot_clearance: f64,
    /// Offset of the assembly guide from the section's mid-height.
    pub elevation: f64,
}

impl Default for BearingParams {
    fn default() -> Self {
        Self {
            inner_radius: 2.5,
            horizontal_thickness: 1.0,
            vertical_thickness: 1.0,
            hole_radius: 0.3025,
            divot_clearance: 0.05,
            elevation: -0.2,
        }
    }
}

/// Why a parameter set cannot produce a valid section.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error(
        "hole radius {hole_radius} must be less than half the horizontal thickness {horizontal_thickness}"
    )]
    HoleTooWide {
        hole_radius: f64,
        horizontal_thickness: f64,
    },

    #[error(
        "hole radius {hole_radius} must be less than half the vertical thickness {vertical_thickness}"
    )]
    HoleTooTall {
        hole_radius: f64,
        vertical_thickness: f64,
    },

    #[error(
        "divot clearance {divot_clearance} must be in [0, {horizontal_thickness}) (horizontal thickness)"
    )]
    ClearanceOutOfRange {
        divot_clearance: f64,
        horizontal_thickness: f64,
    },

    #[error(
        "elevation {elevation} must stay within half the vertical thickness {vertical_thickness}"
    )]
    ElevationOutOfRange {
        elevation: f64,
        vertical_thickness: f64,
    },
}

impl BearingParams {
    fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("inner_radius", self.inner_radius),
            ("horizontal_thickness", self.horizontal_thickness),
            ("vertical_thickness", self.vertical_thickness),
            ("hole_radius", self.hole_radius),
            ("divot_clearance", self.divot_clearance),
            ("elevation", self.elevation),
        ]
    }

    /// Check that the parameters describe a non-degenerate section.
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field, value });
            }
        }
        for (field, value) in self.fields().into_iter().take(4) {
            if value <= 0.0 {
                return Err(ValidationError::NotPositive { field, value });
            }
        }
        if self.hole_radius >= self.horizontal_thickness / 2.0 {
            return Err(ValidationError::HoleTooWide {
                hole_radius: self.hole_radius,
                horizontal_thickness: self.horizontal_thickness,
            });
        }
        if self.hole_radius >= self.vertical_thickness / 2.0 {
            return Err(ValidationError::HoleTooTall {
                hole_radius: self.hole_radius,
                vertical_thickness: self.vertical_thickness,
            });
        }
        if self.divot_clearance < 0.0 || self.divot_clearance >= self.horizontal_thickness {
            return Err(ValidationError::ClearanceOutOfRange {
                divot_clearance: self.divot_clearance,
                horizontal_thickness: self.horizontal_thickness,
            });
        }
        if self.elevation.abs() >= self.vertical_thickness / 2.0 {
            return Err(ValidationError::ElevationOutOfRange {
                elevation: self.elevation,
                vertical_thickness: self.vertical_thickness,
            });
        }
        Ok(())
    }

    /// Outer diameter in whole millimeters, halves rounded to even.
    pub fn outer_diameter_mm(&self) -> i64 {
        ((self.inner_radius + self.horizontal_thickness) * 2.0 * 10.0).round_ties_even() as i64
    }

    /// Name given to the generated component, e.g. `Roller Bearing 70mm OD`.
    pub fn component_name(&self) -> String {
        format!("Roller Bearing {}mm OD", self.outer_diameter_mm())
    }
}
