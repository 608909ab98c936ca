//! Import from and export to plain directories of markdown files.
//!
//! On disk a note path maps to nested directories, so `/blog/2024` becomes
//! `<dir>/blog/2024/`.
use std::{
    fs,
    path::{Component, Path},
};

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::{segments, Directory, GardenError, Note, NoteKind, NoteStore, Result};

/// Imports every `*.md` file under `dir`. The note path mirrors the file's
/// parent directory relative to `dir` and the title is the file stem.
///
/// Returns the number of notes imported.
pub fn import_markdown_dir(store: &mut NoteStore, dir: &Path, kind: NoteKind) -> Result<usize> {
    if !dir.is_dir() {
        return Err(GardenError::FileNotFound {
            file_path: dir.display().to_string(),
        });
    }

    let mut imported = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file = entry.path();
        if !file.is_file() || !file.extension().is_some_and(|ext| ext == "md") {
            continue;
        }

        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                continue;
            }
        };

        let relative = file.strip_prefix(dir).unwrap_or(file);
        let path = note_path_for(relative);
        let title = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut note = Note::new(&path, kind);
        note.apply_edit(&title, content);
        if let Some(modified) = modified_time(file) {
            note.created_at = modified;
            note.updated_at = modified;
        }

        debug!("Importing {} at {}", file.display(), note.path);
        imported.push(note);
    }

    let count = store.add_notes(imported)?;
    info!("Imported {} notes from {}", count, dir.display());
    Ok(count)
}

/// Note path for a file relative to the import root.
fn note_path_for(relative: &Path) -> String {
    let mut path = String::from("/");
    if let Some(parent) = relative.parent() {
        let parts: Vec<String> = parent
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();
        path.push_str(&parts.join("/"));
    }
    path
}

fn modified_time(file: &Path) -> Option<DateTime<Utc>> {
    let modified = fs::metadata(file).ok()?.modified().ok()?;
    Some(DateTime::<Utc>::from(modified))
}

/// Writes the tree out as nested directories of `<title>-<id>.md` files.
///
/// Returns the number of files written.
pub fn export_markdown_dir(tree: &Directory, dir: &Path) -> Result<usize> {
    let mut written = 0;
    for (_, directory) in tree.walk() {
        let mut target = dir.to_path_buf();
        for segment in segments(&directory.path) {
            target.push(sanitize_file_name(segment));
        }
        fs::create_dir_all(&target).map_err(|e| {
            error!("Failed to create {}: {}", target.display(), e);
            GardenError::DirectoryError {
                path: target.clone(),
            }
        })?;

        for note in &directory.notes {
            let file_name = format!("{}-{}.md", sanitize_file_name(&note.title), note.id);
            fs::write(target.join(file_name), &note.content)?;
            written += 1;
        }
    }

    info!("Exported {} notes to {}", written, dir.display());
    Ok(written)
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    match cleaned.trim() {
        "" | "." | ".." => "_".to_string(),
        trimmed => trimmed.to_string(),
    }
}
