pub mod pointer;
pub mod scroll;
pub mod viewport;

pub use pointer::wire_panels;
pub use scroll::wire_scroll;
pub use viewport::{wire_viewport, ViewportWiring};
