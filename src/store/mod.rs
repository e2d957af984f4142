//! Collection persistence
//!
//! The collection is an append-only, newest-first log of hatched creatures.
//! It is saved as one JSON record:
//!
//! ```json
//! {"collection": [{"id": 1, "species": "cat", "colorHex": "#FF004D", ...}]}
//! ```
//!
//! Loading never fails. A missing record, a record without `collection`, or
//! anything that does not parse all yield an empty collection.

mod backend;

pub use backend::{FileBackend, MemoryBackend, PersistenceBackend};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::CreatureDescriptor;

/// Error when the collection cannot be written
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend write failed
    #[error("failed to write collection: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization failed
    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Hatched creatures, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    creatures: Vec<CreatureDescriptor>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Most recently hatched creature
    pub fn latest(&self) -> Option<&CreatureDescriptor> {
        self.creatures.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CreatureDescriptor> {
        self.creatures.iter()
    }

    pub fn as_slice(&self) -> &[CreatureDescriptor] {
        &self.creatures
    }

    fn prepend(&mut self, creature: CreatureDescriptor) {
        self.creatures.insert(0, creature);
    }
}

impl From<Vec<CreatureDescriptor>> for Collection {
    /// `creatures` must already be newest-first.
    fn from(creatures: Vec<CreatureDescriptor>) -> Self {
        Self { creatures }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a CreatureDescriptor;
    type IntoIter = std::slice::Iter<'a, CreatureDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.creatures.iter()
    }
}

/// On-disk record layout. `dex` is the key used by the first browser release.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default, alias = "dex")]
    collection: Collection,
}

/// Parse a persisted record, falling back to an empty collection.
pub fn decode_collection(raw: Option<&str>) -> Collection {
    let Some(raw) = raw else {
        return Collection::new();
    };

    match serde_json::from_str::<PersistedState>(raw) {
        Ok(state) => state.collection,
        Err(e) => {
            warn!(error = %e, "discarding malformed saved collection");
            Collection::new()
        }
    }
}

/// Serialize a collection into the persisted record layout.
pub fn encode_collection(collection: &Collection) -> Result<String, serde_json::Error> {
    // The record only borrows for the duration of serialization
    #[derive(Serialize)]
    struct Record<'a> {
        collection: &'a Collection,
    }
    serde_json::to_string(&Record { collection })
}

/// Owns the in-memory collection and keeps the backend in sync with it.
pub struct CollectionStore {
    backend: Box<dyn PersistenceBackend>,
    collection: Collection,
}

impl CollectionStore {
    /// Open a store, loading whatever the backend last saved.
    pub fn open(backend: impl PersistenceBackend + 'static) -> Self {
        let collection = decode_collection(backend.read_raw().as_deref());
        debug!(count = collection.len(), "loaded collection");
        Self { backend: Box::new(backend), collection }
    }

    /// The in-memory collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Re-read the persisted collection from the backend.
    pub fn load(&self) -> Collection {
        decode_collection(self.backend.read_raw().as_deref())
    }

    /// Insert at the front and persist.
    ///
    /// On a write error the creature stays in the in-memory collection and the
    /// next successful save includes it.
    pub fn append(&mut self, creature: CreatureDescriptor) -> Result<(), StoreError> {
        self.collection.prepend(creature);
        self.persist()
    }

    /// Replace the whole collection and persist it.
    pub fn save(&mut self, collection: Collection) -> Result<(), StoreError> {
        self.collection = collection;
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = encode_collection(&self.collection)?;
        self.backend.write_raw(&raw)?;
        debug!(count = self.collection.len(), "saved collection");
        Ok(())
    }
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore").field("collection", &self.collection).finish_non_exhaustive()
    }
}
