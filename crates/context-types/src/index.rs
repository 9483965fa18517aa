//! Search index and crawler abstractions.
//!
//! These traits describe what the resolver consumes from the host's index
//! registry. Optional capabilities are exposed through accessor methods
//! rather than downcasting:
//! - [`SearchIndex::ranking`] for indexes that can rank themselves
//! - [`Crawler::kind`] for crawlers scoped to a subtree of one database

use std::sync::Arc;

use crate::error::ContextIndexError;
use crate::index_type::IndexType;
use crate::indexable::Indexable;

/// Optional ranking capability of a search index.
///
/// Lower ranks win.
pub trait ContextIndexRankable: Send + Sync {
    /// Rank this index as a context index for `indexable`.
    fn context_index_rank(&self, indexable: &dyn Indexable) -> i32;
}

/// A crawler restricted to a subtree of one database.
pub trait PathScopedCrawler: Send + Sync {
    /// Name of the database this crawler reads from.
    fn database(&self) -> &str;

    /// Path key of the crawl root.
    ///
    /// Looks the root item up through the host item layer. Returns
    /// `Ok(None)` when the root item does not exist.
    fn root_path_key(&self) -> Result<Option<String>, ContextIndexError>;
}

/// Capability variant of a crawler.
#[derive(Clone, Copy)]
pub enum CrawlerKind<'a> {
    /// Crawler scoped to a database subtree
    PathScoped(&'a dyn PathScopedCrawler),

    /// Any other crawler
    Other,
}

impl<'a> CrawlerKind<'a> {
    /// The path-scoped view of this crawler, if any.
    pub fn as_path_scoped(&self) -> Option<&'a dyn PathScopedCrawler> {
        match self {
            CrawlerKind::PathScoped(crawler) => Some(*crawler),
            CrawlerKind::Other => None,
        }
    }
}

impl std::fmt::Debug for CrawlerKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrawlerKind::PathScoped(crawler) => f
                .debug_struct("PathScoped")
                .field("database", &crawler.database())
                .finish_non_exhaustive(),
            CrawlerKind::Other => f.write_str("Other"),
        }
    }
}

/// A crawler owned by a search index.
pub trait Crawler: Send + Sync {
    /// Returns true if `indexable` falls outside this crawler's coverage.
    fn is_excluded(&self, indexable: &dyn Indexable) -> bool;

    /// Capability variant of this crawler.
    fn kind(&self) -> CrawlerKind<'_> {
        CrawlerKind::Other
    }
}

/// A registered search index.
///
/// Index identity is the name: two entries with the same name are the same
/// index.
pub trait SearchIndex: Send + Sync {
    /// Unique index name.
    fn name(&self) -> &str;

    /// Concrete implementation type of this index.
    fn index_type(&self) -> IndexType;

    /// Initialization state.
    ///
    /// `None` means the implementation has no initialization concept and is
    /// always eligible.
    fn is_initialized(&self) -> Option<bool> {
        None
    }

    /// Crawlers owned by this index.
    fn crawlers(&self) -> &[Arc<dyn Crawler>];

    /// Ranking capability, if this index implements it.
    fn ranking(&self) -> Option<&dyn ContextIndexRankable> {
        None
    }

    /// Returns true if this index may take part in resolution.
    fn is_eligible(&self) -> bool {
        self.is_initialized().unwrap_or(true)
    }
}

/// Source of the currently registered indexes.
pub trait IndexRegistry: Send + Sync {
    /// Snapshot of all registered indexes, in registration order.
    ///
    /// The snapshot may contain the same index more than once when it was
    /// registered through several paths.
    fn snapshot(&self) -> Vec<Arc<dyn SearchIndex>>;
}

impl IndexRegistry for Vec<Arc<dyn SearchIndex>> {
    fn snapshot(&self) -> Vec<Arc<dyn SearchIndex>> {
        self.clone()
    }
}
