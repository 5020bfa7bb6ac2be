pub mod arrangement;
pub mod memory_host;
pub mod regions;
pub mod traits;
pub mod types;

pub use memory_host::{Body, MemoryHost, SketchCurve};
pub use traits::*;
pub use types::*;
