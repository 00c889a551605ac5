// src/system/editor.rs

use crate::models::ActiveDocument;
use std::io;
use std::path::{Path, PathBuf};

/// Editor surface: the source of the active document.
pub trait Editor {
    /// The currently focused document, if any.
    fn active_document(&self) -> Option<ActiveDocument>;

    /// Saves the active document's pending edits.
    fn save_active(&mut self) -> io::Result<()>;

    /// Focuses another file.
    fn open(&mut self, path: &Path);
}

/// A command-line "editor" whose active document is a path chosen by the user.
/// Files on disk have no pending edits, so saving is a no-op.
#[derive(Debug, Default, Clone)]
pub struct FileEditor {
    active: Option<PathBuf>,
}

impl FileEditor {
    pub fn new(active: Option<PathBuf>) -> Self {
        Self {
            active: active.map(|p| normalize(&p)),
        }
    }
}

/// Resolves an existing path to its canonical absolute form so the same script
/// reached through different relative paths shares one cache entry. Paths that
/// cannot be canonicalized (e.g. missing files) are kept as given.
fn normalize(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

impl Editor for FileEditor {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.active.as_ref().map(|path| ActiveDocument {
            path: path.clone(),
            is_dirty: false,
        })
    }

    fn save_active(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn open(&mut self, path: &Path) {
        self.active = Some(normalize(path));
    }
}
