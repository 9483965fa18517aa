//! Candidate filter.
//!
//! Selects the indexes whose crawlers actively cover an indexable.

use std::collections::HashSet;
use std::sync::Arc;

use context_types::{Indexable, SearchIndex};

/// Indexes that are eligible and have at least one crawler that does not
/// exclude `indexable`, de-duplicated by name in registry order.
pub fn active_candidates(
    indexes: &[Arc<dyn SearchIndex>],
    indexable: &dyn Indexable,
) -> Vec<Arc<dyn SearchIndex>> {
    let covering = indexes
        .iter()
        .filter(|index| index.is_eligible() && covers(index.as_ref(), indexable))
        .cloned()
        .collect();
    distinct_by_name(covering)
}

fn covers(index: &dyn SearchIndex, indexable: &dyn Indexable) -> bool {
    index
        .crawlers()
        .iter()
        .any(|crawler| !crawler.is_excluded(indexable))
}

/// Drop later entries whose name was already seen.
pub fn distinct_by_name(indexes: Vec<Arc<dyn SearchIndex>>) -> Vec<Arc<dyn SearchIndex>> {
    let mut seen = HashSet::with_capacity(indexes.len());
    indexes
        .into_iter()
        .filter(|index| seen.insert(index.name().to_string()))
        .collect()
}
