use papaya::HashMap as PapayaHashMap;
use psiguard_core::DocumentEnvelope;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub type StorageKey = String; // Format: "collection/id"

pub(crate) fn make_storage_key(collection: &str, id: &str) -> StorageKey {
    format!("{collection}/{id}")
}

/// In-memory document store backed by a papaya lock-free HashMap.
///
/// This store provides:
/// - Lock-free concurrent access via papaya::HashMap
/// - Full CRUD operations keyed by `(collection, id)`
/// - Monotonic version IDs from an atomic counter
#[derive(Debug)]
pub struct InMemoryStore {
    /// Main storage using papaya for lock-free concurrent access
    pub(crate) data: Arc<PapayaHashMap<StorageKey, DocumentEnvelope>>,
    /// Atomic counter for generating version IDs
    pub(crate) version_counter: AtomicU64,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(PapayaHashMap::new()),
            version_counter: AtomicU64::new(1),
        }
    }

    /// Generates the next version ID.
    pub(crate) fn next_version(&self) -> String {
        self.version_counter
            .fetch_add(1, Ordering::SeqCst)
            .to_string()
    }

    /// Number of documents across all collections.
    pub fn count(&self) -> usize {
        let guard = self.data.pin();
        guard.len()
    }

    /// Number of documents in one collection.
    pub fn count_by_collection(&self, collection: &str) -> usize {
        let prefix = format!("{collection}/");
        let guard = self.data.pin();
        guard.iter().filter(|(key, _)| key.starts_with(&prefix)).count()
    }

    /// Returns true if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Removes every document. Mainly useful in tests.
    pub fn clear(&self) {
        let guard = self.data.pin();
        guard.clear();
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
