use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info, trace, warn};
use tempfile::NamedTempFile;

use crate::{build_directory_tree, normalize_path, Directory, GardenError, Note, NoteKind, Result};

/// Owns the note collection and its JSON blob on disk.
///
/// The whole collection is rewritten on every mutation. The directory tree
/// is not cached; call [`NoteStore::tree`] after a change.
pub struct NoteStore {
    /// Location of the JSON blob
    file: PathBuf,

    /// All notes, in insertion order
    notes: Vec<Note>,
}

impl NoteStore {
    /// Opens the blob at `file`.
    ///
    /// A missing file is an empty collection. A blob that cannot be parsed is
    /// logged and treated as empty too; it is only overwritten by the next
    /// mutation.
    pub fn open(file: impl Into<PathBuf>) -> Result<Self> {
        let file = file.into();

        let notes = if file.exists() {
            let raw = fs::read_to_string(&file).map_err(|e| {
                error!("Failed to read notes from {}: {}", file.display(), e);
                GardenError::Io(e)
            })?;
            match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => notes,
                Err(e) => {
                    warn!(
                        "Ignoring unreadable notes blob {}: {}",
                        file.display(),
                        e
                    );
                    Vec::new()
                }
            }
        } else {
            debug!("No notes blob at {}, starting empty", file.display());
            Vec::new()
        };

        info!("Loaded {} notes from {}", notes.len(), file.display());
        Ok(Self { file, notes })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Notes living exactly at `path`.
    pub fn notes_at(&self, path: &str) -> Vec<&Note> {
        let path = normalize_path(path);
        self.notes
            .iter()
            .filter(|note| normalize_path(&note.path) == path)
            .collect()
    }

    /// Rebuilds the directory tree from the current collection.
    pub fn tree(&self) -> Directory {
        build_directory_tree(&self.notes)
    }

    /// Creates, stores and returns an empty note under `path`.
    pub fn create_note(&mut self, path: &str, kind: NoteKind) -> Result<Note> {
        self.add_note(Note::new(path, kind))
    }

    /// Stores a new note under a unique id derived from its own, written
    /// once. Returns the note as stored.
    pub fn add_note(&mut self, mut note: Note) -> Result<Note> {
        note.id = self.unique_id(&note.id);

        info!("Creating {} {} at {}", note.kind, note.id, note.path);
        let old_len = self.notes.len();
        self.notes.push(note.clone());
        self.persist_or_truncate(old_len)?;
        Ok(note)
    }

    /// Like [`NoteStore::add_note`] for many notes, written once.
    pub fn add_notes(&mut self, notes: Vec<Note>) -> Result<usize> {
        let count = notes.len();
        let old_len = self.notes.len();
        for mut note in notes {
            // earlier notes of the batch are already in `self.notes`
            note.id = self.unique_id(&note.id);
            self.notes.push(note);
        }
        self.persist_or_truncate(old_len)?;
        Ok(count)
    }

    /// Adds a note keeping its id; an id already in use is an error.
    pub fn insert_note(&mut self, note: Note) -> Result<()> {
        if self.get_note(&note.id).is_some() {
            return Err(GardenError::NoteAlreadyExists { id: note.id });
        }
        let old_len = self.notes.len();
        self.notes.push(note);
        self.persist_or_truncate(old_len)
    }

    /// Replaces the stored note with the same id. On a failed write the
    /// previous version is kept.
    pub fn save_note(&mut self, note: Note) -> Result<()> {
        info!("Saving note: {}", note.id);
        let position = self
            .notes
            .iter()
            .position(|existing| existing.id == note.id)
            .ok_or_else(|| GardenError::NoteNotFound {
                id: note.id.clone(),
            })?;

        let previous = std::mem::replace(&mut self.notes[position], note);
        if let Err(e) = self.persist() {
            self.notes[position] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Persists, dropping everything past `old_len` from memory if the write
    /// fails.
    fn persist_or_truncate(&mut self, old_len: usize) -> Result<()> {
        if let Err(e) = self.persist() {
            warn!(
                "Discarding {} unsaved notes",
                self.notes.len().saturating_sub(old_len)
            );
            self.notes.truncate(old_len);
            return Err(e);
        }
        Ok(())
    }

    /// Returns `candidate`, or the next free millisecond-style id after it.
    fn unique_id(&self, candidate: &str) -> String {
        if self.get_note(candidate).is_none() {
            return candidate.to_string();
        }
        let mut next = candidate.parse::<i64>().unwrap_or(0);
        loop {
            next += 1;
            let id = next.to_string();
            if self.get_note(&id).is_none() {
                trace!("Id {} taken, using {}", candidate, id);
                return id;
            }
        }
    }

    /// Atomically rewrites the blob through a temp file in the same directory.
    fn persist(&self) -> Result<()> {
        let dir = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            debug!("Creating data directory: {}", dir.display());
            fs::create_dir_all(&dir).map_err(|e| {
                error!("Failed to create directory {}: {}", dir.display(), e);
                GardenError::DirectoryError { path: dir.clone() }
            })?;
        }

        let json = serde_json::to_string_pretty(&self.notes).map_err(|e| {
            error!("Failed to serialize notes: {}", e);
            GardenError::Serialization(e)
        })?;

        let mut temp_file = NamedTempFile::new_in(&dir)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.file).map_err(|e| {
            error!("Failed to replace {}: {}", self.file.display(), e);
            GardenError::Io(e.error)
        })?;

        debug!("Wrote {} notes to {}", self.notes.len(), self.file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir) -> NoteStore {
        NoteStore::open(dir.path().join("notes.json")).unwrap()
    }

    #[test]
    fn missing_blob_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.notes().is_empty());
        assert!(!store.file().exists());
    }

    #[test]
    fn created_notes_get_distinct_ids_and_persist() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let a = store.create_note("/blog", NoteKind::Blog).unwrap();
        let b = store.create_note("/blog", NoteKind::Blog).unwrap();
        assert_ne!(a.id, b.id);

        let reopened = store_in(&dir);
        assert_eq!(reopened.notes(), store.notes());
        assert_eq!(reopened.notes_at("/blog/").len(), 2);
    }

    #[test]
    fn save_replaces_by_id() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut note = store.create_note("/", NoteKind::Note).unwrap();
        note.apply_edit("Hello", "world".to_string());
        store.save_note(note.clone()).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.notes().len(), 1);
        assert_eq!(reopened.get_note(&note.id).unwrap().title, "Hello");
    }

    #[test]
    fn save_unknown_note_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let stray = Note::new("/", NoteKind::Note);
        assert!(matches!(
            store.save_note(stray),
            Err(GardenError::NoteNotFound { .. })
        ));
    }

    #[test]
    fn duplicate_insert_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let note = store.create_note("/", NoteKind::Note).unwrap();
        assert!(matches!(
            store.insert_note(note),
            Err(GardenError::NoteAlreadyExists { .. })
        ));
    }

    #[test]
    fn add_notes_makes_batch_ids_unique() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let existing = store.create_note("/", NoteKind::Note).unwrap();

        let mut twin = Note::new("/a", NoteKind::Note);
        twin.id = existing.id.clone();
        let batch = vec![twin.clone(), twin];
        assert_eq!(store.add_notes(batch).unwrap(), 2);

        let mut ids: Vec<&str> = store.notes().iter().map(|n| n.id.as_str()).collect();
        assert!(ids.iter().all(|id| id.parse::<i64>().is_ok()));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let mut store = NoteStore::open(blocker.join("notes.json")).unwrap();

        assert!(store.create_note("/", NoteKind::Note).is_err());
        assert!(store.notes().is_empty());

        assert!(store.insert_note(Note::new("/a", NoteKind::Blog)).is_err());
        assert!(store
            .add_notes(vec![Note::new("/b", NoteKind::Note)])
            .is_err());
        assert!(store.notes().is_empty());
        assert!(store.tree().children.is_empty());
    }

    #[test]
    fn failed_save_keeps_previous_version() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        let mut store = NoteStore::open(data.join("notes.json")).unwrap();
        let mut note = store.create_note("/", NoteKind::Note).unwrap();

        fs::remove_dir_all(&data).unwrap();
        fs::write(&data, "not a directory").unwrap();

        note.apply_edit("Changed", "new body".to_string());
        assert!(store.save_note(note.clone()).is_err());
        let kept = store.get_note(&note.id).unwrap();
        assert_eq!(kept.title, "New note");
        assert!(kept.content.is_empty());
    }

    #[test]
    fn corrupt_blob_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "[{ broken").unwrap();
        let store = NoteStore::open(&path).unwrap();
        assert!(store.notes().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[{ broken");
    }

    #[test]
    fn tree_reflects_mutations() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.tree().children.is_empty());

        let mut note = store.create_note("/drafts", NoteKind::Note).unwrap();
        assert!(store.tree().find("/drafts").is_some());

        note.path = "/published".to_string();
        store.save_note(note).unwrap();
        let tree = store.tree();
        assert!(tree.find("/drafts").is_none());
        assert_eq!(tree.find("/published").unwrap().notes.len(), 1);
    }
}
