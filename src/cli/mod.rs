//! Command-line surface of the garden application.
mod app;
mod main;

pub use app::*;
pub use main::*;
