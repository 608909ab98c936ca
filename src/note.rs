//! Core data structures for the garden application.
//!
//! A [`Note`] is the only persisted record. Directories are derived from
//! note paths, see [`crate::build_directory_tree`].
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize_path;

/// Title given to a note saved with a blank title.
pub const UNTITLED: &str = "Untitled";

/// Presentational tag of a note. Has no effect on storage or placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Blog,
    #[default]
    Note,
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteKind::Blog => write!(f, "blog"),
            NoteKind::Note => write!(f, "note"),
        }
    }
}

/// Represents a single note in the garden
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier for the note
    pub id: String,
    /// Note title
    pub title: String,
    /// Note content in Markdown format, may contain `$...$` math
    pub content: String,
    /// Directory the note lives in, `/` or `/seg1/seg2`
    pub path: String,
    /// Blog post or plain note
    #[serde(rename = "type")]
    pub kind: NoteKind,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates an empty note of the given kind under `path`.
    ///
    /// The id is the creation instant in milliseconds; [`crate::NoteStore`]
    /// makes it unique within a collection.
    pub fn new(path: &str, kind: NoteKind) -> Self {
        let now = Utc::now();

        Note {
            id: now.timestamp_millis().to_string(),
            title: format!("New {}", kind),
            content: String::new(),
            path: normalize_path(path),
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an editor save: trims the title (blank becomes "Untitled"),
    /// replaces the content and refreshes `updated_at`.
    pub fn apply_edit(&mut self, title: &str, content: String) {
        let title = title.trim();
        self.title = if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title.to_string()
        };
        self.content = content;
        self.updated_at = Utc::now();
    }
}
