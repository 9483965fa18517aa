//! Path-fallback locator.
//!
//! When no crawler actively covers an item, an index still owns it if one of
//! its path-scoped crawlers is rooted above the item in the same database.
//! Root items are read inside a privileged read scope so that security
//! filtering and cache writes do not affect the check.

use std::sync::Arc;

use tracing::debug;

use context_types::{
    ContextIndexError, Indexable, ItemLocation, ReadModeToggle, ReadScope, SearchIndex,
};

use crate::filter::distinct_by_name;

/// Indexes owning the subtree that contains `indexable`'s item.
///
/// Returns an empty list for indexables without an underlying hierarchical
/// item. Errors from the item layer are returned after the read scope has
/// been released.
pub fn path_related_indexes(
    indexable: &dyn Indexable,
    indexes: &[Arc<dyn SearchIndex>],
    read_mode: &dyn ReadModeToggle,
) -> Result<Vec<Arc<dyn SearchIndex>>, ContextIndexError> {
    let Some(item) = indexable.item()? else {
        return Ok(Vec::new());
    };

    let mut related = Vec::new();
    {
        let _scope = ReadScope::enter(read_mode);
        for index in indexes {
            if owns_path(index.as_ref(), &item)? {
                related.push(Arc::clone(index));
            }
        }
    }

    debug!(
        database = %item.database,
        path_key = %item.path_key,
        related = related.len(),
        "Path fallback lookup complete"
    );

    Ok(distinct_by_name(related))
}

fn owns_path(index: &dyn SearchIndex, item: &ItemLocation) -> Result<bool, ContextIndexError> {
    for crawler in index.crawlers() {
        let Some(scoped) = crawler.kind().as_path_scoped() else {
            continue;
        };
        let Some(root) = scoped.root_path_key()? else {
            continue;
        };
        if item.is_in_database(scoped.database()) && item.is_under(&root) {
            return Ok(true);
        }
    }
    Ok(false)
}
