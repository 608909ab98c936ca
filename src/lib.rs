//! Digital Writing Garden library
//!
//! A personal space for blog posts and notes. Notes are stored as a flat
//! collection in a single JSON blob; directories are never stored but
//! projected from note paths with [`build_directory_tree`].

mod cli;
mod config;
mod errors;
mod helper;
mod markdown;
mod note;
mod path;
mod storage;
mod theme;
mod transfer;
mod tree;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use markdown::*;
pub use note::*;
pub use path::*;
pub use storage::*;
pub use theme::*;
pub use transfer::*;
pub use tree::*;
pub use types::*;
