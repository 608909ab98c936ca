//! Shared types for the garden application: the result alias and the CLI
//! subcommands.
use std::path::PathBuf;

use clap::Subcommand;

use crate::{GardenError, NoteKind, Snippet, Theme};

/// A specialized Result type for garden operations.
pub type Result<T> = std::result::Result<T, GardenError>;

/// Available subcommands for the garden application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note or blog post
    New {
        /// Directory the note lives in, e.g. /blog/2024
        #[clap(short, long, default_value = "/")]
        path: String,

        /// Kind of entry
        #[clap(short, long, value_enum, default_value_t = NoteKind::Note)]
        kind: NoteKind,

        /// Title of the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Content of the note, can be markdown formatted
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the note's content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Append an editor template to the content
        #[clap(short, long, value_enum)]
        snippet: Option<Snippet>,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the new note content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Append an editor template to the content
        #[clap(short, long, value_enum)]
        snippet: Option<Snippet>,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long, conflicts_with = "html")]
        json: bool,

        /// Render the content to HTML
        #[clap(long)]
        html: bool,
    },

    /// Show the directory tree
    Tree {
        /// Only show the subtree at this path
        #[clap(short, long, default_value = "/")]
        path: String,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Resolve the path of a new directory under a parent
    Dir {
        /// Parent directory
        parent: String,

        /// Name of the new directory
        name: String,
    },

    /// Render a note to HTML
    Render {
        /// ID of the note to render
        id: String,

        /// Write HTML here instead of stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change the colour theme
    Theme {
        /// Switch to this theme
        #[clap(short, long, value_enum, conflicts_with = "cycle")]
        set: Option<Theme>,

        /// Switch to the next theme
        #[clap(short, long)]
        cycle: bool,

        /// List available themes
        #[clap(short, long)]
        list: bool,
    },

    /// Import a directory of markdown files
    Import {
        /// Directory to import from
        source: PathBuf,

        /// Kind given to imported notes
        #[clap(short, long, value_enum, default_value_t = NoteKind::Note)]
        kind: NoteKind,
    },

    /// Export all notes as a directory of markdown files
    Export {
        /// Directory where exported files will be saved
        output: PathBuf,
    },
}
