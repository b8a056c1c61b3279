pub mod config;
pub mod constants;
pub mod easing;
pub mod frame_gate;
pub mod loader;
pub mod panel;
pub mod scroll;
pub mod viewport;

pub use config::*;
pub use easing::*;
pub use frame_gate::*;
pub use loader::*;
pub use panel::*;
pub use scroll::*;
pub use viewport::*;
