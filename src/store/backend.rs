//! Raw persistence backends
//!
//! A backend stores one opaque string, the whole serialized record. The
//! store never writes partial updates, so backends need no transactions.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::warn;

/// Where the serialized collection lives between sessions.
pub trait PersistenceBackend {
    /// The last written record, or `None` when nothing has been saved.
    fn read_raw(&self) -> Option<String>;

    /// Overwrite the record.
    fn write_raw(&mut self, raw: &str) -> io::Result<()>;
}

/// In-memory backend. Clones share the same slot, so a test can keep a handle
/// after giving one to the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with a record, as if saved by an earlier session.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(raw.into()))) }
    }

    /// Current contents of the slot.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl PersistenceBackend for MemoryBackend {
    fn read_raw(&self) -> Option<String> {
        self.raw()
    }

    fn write_raw(&mut self, raw: &str) -> io::Result<()> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }
}

/// Stores the record in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceBackend for FileBackend {
    fn read_raw(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read saved collection");
                None
            }
        }
    }

    fn write_raw(&mut self, raw: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write then rename so a crash never leaves a truncated record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)
    }
}
