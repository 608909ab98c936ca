//! Error types for the garden application.
//!
//! The path helpers and the directory tree builder are total and never fail;
//! everything here belongs to storage, configuration and the CLI.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the garden application.
#[derive(Error, Debug)]
pub enum GardenError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// Note with the same ID already exists.
    #[error("Note already exists: {id}")]
    NoteAlreadyExists { id: String },

    /// A directory name that cannot be joined onto a path.
    #[error("Invalid path segment {segment:?}: {reason}")]
    InvalidSegment { segment: String, reason: String },

    /// Invalid note format or content.
    #[error("Invalid note format: {message}")]
    InvalidFormat { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// No note lives at or below this path, so the directory does not exist.
    #[error("No directory at {path}")]
    DirectoryNotFound { path: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },

    #[error("{message}")]
    EditorError { message: String },
}
