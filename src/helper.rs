use std::{fs, path::PathBuf};

use log::error;

use crate::{GardenError, Result};

/// Resolves note content from an inline value or a file, refusing both.
/// `Ok(None)` means neither was given.
pub fn read_content_source(
    content: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>> {
    match (content, file) {
        (Some(_), Some(_)) => Err(GardenError::InvalidFormat {
            message: "Cannot specify both --content and --file options".to_string(),
        }),
        (Some(c), None) => Ok(Some(c)),
        (None, Some(file_path)) => {
            if !file_path.exists() {
                return Err(GardenError::FileNotFound {
                    file_path: file_path.display().to_string(),
                });
            }
            let content = fs::read_to_string(&file_path).map_err(|e| {
                error!("Failed to read {}: {}", file_path.display(), e);
                GardenError::Io(e)
            })?;
            Ok(Some(content))
        }
        (None, None) => Ok(None),
    }
}

/// Drops the `<!-- ... -->` guidance lines written into the editor template.
pub fn strip_editor_comments(content: &str) -> String {
    let mut in_comment = false;
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if in_comment {
                in_comment = !trimmed.ends_with("-->");
                return false;
            }
            if trimmed.starts_with("<!--") {
                in_comment = !trimmed.ends_with("-->");
                return false;
            }
            true
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// First non-empty line, cut to `max_chars` characters.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim();

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
