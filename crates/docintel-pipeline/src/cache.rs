//! Opt-in cache of built vector indexes
//!
//! Keyed by a SHA-256 of the declared format and the document bytes, so a
//! re-uploaded file with identical content reuses its index and a replaced
//! file misses. Entries are evicted oldest-first once the cache is full.

use docintel_domain::Document;
use docintel_store::VectorIndex;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Default number of indexes kept
pub const DEFAULT_CACHE_ENTRIES: usize = 16;

/// Content hash identifying a document for caching
pub fn document_key(document: &Document) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.format().as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(document.bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Default)]
struct Entries {
    indexes: HashMap<String, Arc<VectorIndex>>,
    order: VecDeque<String>,
}

/// Thread-safe map from document hash to a built index
pub struct IndexCache {
    max_entries: usize,
    entries: Mutex<Entries>,
}

impl IndexCache {
    /// Create a cache holding at most `max_entries` indexes
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            entries: Mutex::new(Entries::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up the index for `key`
    pub fn get(&self, key: &str) -> Option<Arc<VectorIndex>> {
        self.lock().indexes.get(key).cloned()
    }

    /// Store an index, evicting the oldest entry when full
    pub fn insert(&self, key: String, index: Arc<VectorIndex>) {
        let mut entries = self.lock();
        if entries.indexes.insert(key.clone(), index).is_some() {
            return;
        }
        entries.order.push_back(key);

        while entries.order.len() > self.max_entries {
            if let Some(oldest) = entries.order.pop_front() {
                debug!(key = %oldest, "Evicting cached index");
                entries.indexes.remove(&oldest);
            }
        }
    }

    /// Drop the index cached for `document`, returning whether one existed
    pub fn invalidate(&self, document: &Document) -> bool {
        self.invalidate_key(&document_key(document))
    }

    /// Drop the index cached under `key`
    pub fn invalidate_key(&self, key: &str) -> bool {
        let mut entries = self.lock();
        entries.order.retain(|k| k != key);
        entries.indexes.remove(key).is_some()
    }

    /// Drop every cached index
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.indexes.clear();
        entries.order.clear();
    }

    /// Number of cached indexes
    pub fn len(&self) -> usize {
        self.lock().indexes.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docintel_domain::DocumentFormat;
    use docintel_store::HashingEmbeddingModel;

    fn empty_index() -> Arc<VectorIndex> {
        Arc::new(VectorIndex::build(Vec::new(), Arc::new(HashingEmbeddingModel::new(8))).unwrap())
    }

    #[test]
    fn test_key_depends_on_bytes_and_format() {
        let a = Document::new(DocumentFormat::Pdf, b"same".to_vec());
        let b = Document::new(DocumentFormat::Pdf, b"same".to_vec()).with_name("other.pdf");
        let c = Document::new(DocumentFormat::Docx, b"same".to_vec());
        let d = Document::new(DocumentFormat::Pdf, b"different".to_vec());

        assert_eq!(document_key(&a), document_key(&b));
        assert_ne!(document_key(&a), document_key(&c));
        assert_ne!(document_key(&a), document_key(&d));
        assert_eq!(document_key(&a).len(), 64);
    }

    #[test]
    fn test_insert_get_invalidate() {
        let cache = IndexCache::default();
        let doc = Document::new(DocumentFormat::Pdf, b"bytes".to_vec());
        let key = document_key(&doc);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), empty_index());
        assert!(cache.get(&key).is_some());

        assert!(cache.invalidate(&doc));
        assert!(cache.get(&key).is_none());
        assert!(!cache.invalidate(&doc));
    }

    #[test]
    fn test_evicts_oldest() {
        let cache = IndexCache::new(2);
        cache.insert("a".to_string(), empty_index());
        cache.insert("b".to_string(), empty_index());
        cache.insert("c".to_string(), empty_index());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("c").is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
