pub mod geom;
pub mod handles;
pub mod profile;
pub mod regions;

pub use geom::*;
pub use handles::*;
pub use profile::*;
pub use regions::*;
