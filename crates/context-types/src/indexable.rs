//! Indexable content items.
//!
//! An indexable is the item being resolved to a context index. Hosts
//! implement [`Indexable`] for their own item wrappers.

use serde::{Deserialize, Serialize};

use crate::error::ContextIndexError;

/// Location of a hierarchical content item.
///
/// `path_key` is encoded so that subtree containment is a plain string
/// prefix test: an item lies under a root exactly when its key starts with
/// the root's key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemLocation {
    /// Name of the data source (database) holding the item
    pub database: String,

    /// Path-encoded key of the item, e.g. `/{root}/{home}/{page}`
    pub path_key: String,
}

impl ItemLocation {
    /// Create a new item location.
    pub fn new(database: impl Into<String>, path_key: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            path_key: path_key.into(),
        }
    }

    /// Returns true if this item lives in `database`.
    ///
    /// Database names compare case-insensitively with full Unicode case
    /// folding, independent of any locale.
    pub fn is_in_database(&self, database: &str) -> bool {
        self.database == database || self.database.to_lowercase() == database.to_lowercase()
    }

    /// Returns true if this item sits at or below `root_key`.
    pub fn is_under(&self, root_key: &str) -> bool {
        self.path_key.starts_with(root_key)
    }
}

/// A content item that can be resolved to a context index.
pub trait Indexable: Send + Sync {
    /// Stable identifier of the item.
    fn id(&self) -> &str;

    /// Display path, used in diagnostics.
    fn absolute_path(&self) -> &str;

    /// The underlying hierarchical item, for path-bearing indexables.
    ///
    /// Returns `Ok(None)` when the indexable is not of the path-bearing
    /// kind. The host item layer may fail with
    /// [`ContextIndexError::InvalidState`] when the item cannot be produced.
    fn item(&self) -> Result<Option<ItemLocation>, ContextIndexError> {
        Ok(None)
    }
}
