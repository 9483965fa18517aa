//! In-memory index registry.
//!
//! A thread-safe list of registered indexes. Registration order is kept and
//! the same index may be registered more than once; resolution collapses
//! duplicates by name.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use context_types::{IndexRegistry, SearchIndex};

/// Registry of search indexes held in memory.
///
/// # Example
///
/// ```
/// use context_resolver::mock::MockIndex;
/// use context_resolver::InMemoryIndexRegistry;
/// use context_types::{IndexRegistry, IndexType};
///
/// let registry = InMemoryIndexRegistry::new();
/// registry.register(MockIndex::new("master_index", IndexType::Lucene).into_arc());
/// assert_eq!(registry.names(), vec!["master_index".to_string()]);
///
/// registry.remove("master_index");
/// assert!(registry.snapshot().is_empty());
/// ```
#[derive(Default)]
pub struct InMemoryIndexRegistry {
    indexes: RwLock<Vec<Arc<dyn SearchIndex>>>,
}

impl InMemoryIndexRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `indexes`.
    pub fn with_indexes(indexes: Vec<Arc<dyn SearchIndex>>) -> Self {
        Self {
            indexes: RwLock::new(indexes),
        }
    }

    /// Register an index.
    pub fn register(&self, index: Arc<dyn SearchIndex>) {
        debug!(index = index.name(), "Registering index");
        self.indexes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(index);
    }

    /// Remove every entry named `name`. Returns the number removed.
    pub fn remove(&self, name: &str) -> usize {
        let mut indexes = self.indexes.write().unwrap_or_else(PoisonError::into_inner);
        let before = indexes.len();
        indexes.retain(|index| index.name() != name);
        before - indexes.len()
    }

    /// Names of all entries, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|index| index.name().to_string())
            .collect()
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IndexRegistry for InMemoryIndexRegistry {
    fn snapshot(&self) -> Vec<Arc<dyn SearchIndex>> {
        self.indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
