//! Directory tree builder.
//!
//! Directories are never stored. The tree is projected from the flat note
//! collection every time it is needed and discarded afterwards, so it cannot
//! drift from the notes.

use std::{cmp::Ordering, collections::HashMap};

use log::{debug, trace, warn};
use serde::Serialize;

use crate::{create_path, normalize_path, segments, Note, ROOT_NAME, ROOT_PATH};

/// A derived directory node.
///
/// Dropping and comparing are iterative, so a tree built from a very deep
/// path does not exhaust the stack.
#[derive(Debug, Clone, Serialize)]
pub struct Directory {
    /// Last path segment, "Root" for the root
    pub name: String,
    /// Full path, the root is "/"
    pub path: String,
    /// Subdirectories sorted by name
    pub children: Vec<Directory>,
    /// Notes living exactly at `path`, most recently updated first
    pub notes: Vec<Note>,
}

impl Directory {
    fn empty(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            children: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }

    /// Looks up the directory at `path` (normalized first).
    pub fn find(&self, path: &str) -> Option<&Directory> {
        let mut current = self;
        let mut prefix = ROOT_PATH.to_string();
        for segment in segments(path) {
            prefix = create_path(&prefix, segment);
            current = current.children.iter().find(|c| c.path == prefix)?;
        }
        Some(current)
    }

    /// Number of notes in this directory and all descendants.
    pub fn note_count(&self) -> usize {
        self.walk().map(|(_, dir)| dir.notes.len()).sum()
    }

    /// Depth-first pre-order traversal yielding `(depth, directory)`,
    /// starting with `self` at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

impl PartialEq for Directory {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.walk();
        let mut right = other.walk();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some((da, a)), Some((db, b))) => {
                    if da != db
                        || a.name != b.name
                        || a.path != b.path
                        || a.children.len() != b.children.len()
                        || a.notes != b.notes
                    {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl Drop for Directory {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut dir) = pending.pop() {
            pending.append(&mut dir.children);
        }
    }
}

/// Iterator returned by [`Directory::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Directory)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Directory);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, dir) = self.stack.pop()?;
        self.stack
            .extend(dir.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, dir))
    }
}

/// Arena slot used while building; links are indices into the arena.
struct Slot {
    name: String,
    path: String,
    children: Vec<usize>,
    notes: Vec<usize>,
}

/// Projects a flat note collection into a sorted directory tree.
///
/// Every ancestor prefix of every note path becomes a directory. Each note is
/// attached to the directory matching its normalized path, so a note is never
/// dropped: paths made only of slashes land in the root. The result does not
/// depend on the order of `notes`, except that notes with equal `updated_at`
/// keep their relative input order.
pub fn build_directory_tree(notes: &[Note]) -> Directory {
    let mut arena = vec![Slot {
        name: ROOT_NAME.to_string(),
        path: ROOT_PATH.to_string(),
        children: Vec::new(),
        notes: Vec::new(),
    }];
    let mut index: HashMap<String, usize> = HashMap::new();
    index.insert(ROOT_PATH.to_string(), 0);

    for note in notes {
        let mut current_path = ROOT_PATH.to_string();
        for part in segments(&note.path) {
            let new_path = create_path(&current_path, part);

            if !index.contains_key(&new_path) {
                let slot = arena.len();
                arena.push(Slot {
                    name: part.to_string(),
                    path: new_path.clone(),
                    children: Vec::new(),
                    notes: Vec::new(),
                });
                index.insert(new_path.clone(), slot);
                trace!("Created directory {}", new_path);

                if let Some(&parent) = index.get(&current_path) {
                    let already_linked = arena[parent]
                        .children
                        .iter()
                        .any(|&child| arena[child].path == new_path);
                    if !already_linked {
                        arena[parent].children.push(slot);
                    }
                }
            }

            current_path = new_path;
        }
    }

    for (position, note) in notes.iter().enumerate() {
        let path = normalize_path(&note.path);
        match index.get(&path) {
            Some(&slot) => arena[slot].notes.push(position),
            None => {
                warn!("No directory for note {} at {}, attaching to root", note.id, path);
                arena[0].notes.push(position);
            }
        }
    }

    debug!(
        "Built directory tree with {} directories for {} notes",
        arena.len(),
        notes.len()
    );

    assemble(arena, notes)
}

/// Turns the arena into owned directories, deepest slots first. A slot is
/// always pushed after its parent, so walking the arena backwards finishes
/// every child before its parent needs it.
fn assemble(arena: Vec<Slot>, notes: &[Note]) -> Directory {
    let mut built: Vec<Option<Directory>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for (position, slot) in arena.into_iter().enumerate().rev() {
        let mut dir = Directory::empty(&slot.name, &slot.path);

        dir.children = slot
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        dir.children.sort_by(|a, b| compare_names(&a.name, &b.name));

        dir.notes = slot.notes.iter().map(|&i| notes[i].clone()).collect();
        // stable: equal timestamps keep input order
        dir.notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        built[position] = Some(dir);
    }

    built
        .first_mut()
        .and_then(Option::take)
        .unwrap_or_else(|| Directory::empty(ROOT_NAME, ROOT_PATH))
}

/// Case-insensitive name order; on a case-only difference lowercase sorts
/// first.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
