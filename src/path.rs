//! Helpers for slash-delimited note paths.
//!
//! These are total over any string: degenerate input falls back to the root
//! rather than failing. Only [`try_create_path`] validates.

use crate::{GardenError, Result};

/// Path of the root directory.
pub const ROOT_PATH: &str = "/";

/// Display name of the root directory.
pub const ROOT_NAME: &str = "Root";

/// Splits a path into its non-blank segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Rebuilds a path from its segments, so `"/a//b/"` becomes `"/a/b"` and
/// `""` or `"///"` become `"/"`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in segments(path) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push_str(ROOT_PATH);
    }
    normalized
}

/// Joins a parent path and a single segment.
///
/// `name` is not checked for separators; use [`try_create_path`] for input
/// coming from a user.
pub fn create_path(parent_path: &str, name: &str) -> String {
    if parent_path == ROOT_PATH {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent_path, name)
    }
}

/// Like [`create_path`] but trims `name` and rejects empty names or names
/// containing `/`.
pub fn try_create_path(parent_path: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GardenError::InvalidSegment {
            segment: name.to_string(),
            reason: "name is empty".to_string(),
        });
    }
    if trimmed.contains('/') {
        return Err(GardenError::InvalidSegment {
            segment: name.to_string(),
            reason: "name contains a path separator".to_string(),
        });
    }
    Ok(create_path(&normalize_path(parent_path), trimmed))
}

/// Returns the parent of `path`; the root and single-segment paths have the
/// root as parent.
pub fn get_parent_path(path: &str) -> String {
    if path == ROOT_PATH {
        return ROOT_PATH.to_string();
    }
    let parts: Vec<&str> = segments(path).collect();
    if parts.len() <= 1 {
        ROOT_PATH.to_string()
    } else {
        format!("/{}", parts[..parts.len() - 1].join("/"))
    }
}

/// Returns the last segment of `path`, or "Root".
pub fn get_path_name(path: &str) -> String {
    if path == ROOT_PATH {
        return ROOT_NAME.to_string();
    }
    segments(path)
        .last()
        .unwrap_or(ROOT_NAME)
        .to_string()
}
