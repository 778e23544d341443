pub mod classifier;
pub mod components;
pub mod renderer;
pub mod renders;
pub mod traits;

pub use classifier::*;
pub use components::*;
pub use renderer::*;
pub use renders::*;
pub use traits::*;
