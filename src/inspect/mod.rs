pub mod impls;
pub mod json;
pub mod types;
pub mod well_known;

pub use types::*;
pub use well_known::WellKnown;
