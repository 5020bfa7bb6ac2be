pub mod params;
pub mod points;
pub mod revolve;
pub mod select;
pub mod sketch;
pub mod types;

pub use params::{BearingParams, ValidationError};
pub use points::{derive_points, ProfilePoints};
pub use revolve::{execute_revolve, plan_revolves};
pub use select::{classify, select_profiles, SelectedProfiles};
pub use sketch::{draw_profile, open_profile_sketch, BearingCurves, OuterBoundary};
pub use types::*;
