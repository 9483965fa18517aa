//! Mock collaborators for testing.
//!
//! `MockIndex`, `MockCrawler` and `MockIndexable` implement the host traits
//! with builder-style configuration so resolution scenarios can be set up
//! without a real index registry or item layer.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use context_types::{
    ContextIndexError, ContextIndexRankable, Crawler, CrawlerKind, IndexType, Indexable,
    ItemLocation, PathScopedCrawler, SearchIndex, ThreadLocalReadMode,
};

/// Mock indexable.
#[derive(Debug, Clone)]
pub struct MockIndexable {
    /// Item ID
    pub id: String,
    /// Absolute path reported for diagnostics
    pub path: String,
    /// Underlying hierarchical item, if any
    pub location: Option<ItemLocation>,
    /// When set, item lookups fail with this invalid-state message
    pub invalid_state: Option<String>,
}

impl MockIndexable {
    /// Create an indexable without an underlying hierarchical item.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            location: None,
            invalid_state: None,
        }
    }

    /// Give the indexable an underlying item in `database` at `path_key`.
    pub fn with_item(mut self, database: impl Into<String>, path_key: impl Into<String>) -> Self {
        self.location = Some(ItemLocation::new(database, path_key));
        self
    }

    /// Make the item layer fail with an invalid-state fault.
    pub fn with_invalid_state(mut self, message: impl Into<String>) -> Self {
        self.invalid_state = Some(message.into());
        self
    }
}

impl Indexable for MockIndexable {
    fn id(&self) -> &str {
        &self.id
    }

    fn absolute_path(&self) -> &str {
        &self.path
    }

    fn item(&self) -> Result<Option<ItemLocation>, ContextIndexError> {
        if let Some(message) = &self.invalid_state {
            return Err(ContextIndexError::InvalidState(message.clone()));
        }
        Ok(self.location.clone())
    }
}

/// Path scope of a mock crawler.
#[derive(Debug, Default)]
pub struct MockPathScope {
    /// Database the crawler reads from
    pub database: String,
    /// Path key of the crawl root; `None` when the root item is missing
    pub root_path_key: Option<String>,
    /// When set, root lookups fail with this host error
    pub root_error: Option<String>,
    /// Number of root lookups
    pub root_lookups: AtomicUsize,
    /// Number of root lookups made inside a privileged read scope
    pub privileged_root_lookups: AtomicUsize,
}

impl PathScopedCrawler for MockPathScope {
    fn database(&self) -> &str {
        &self.database
    }

    fn root_path_key(&self) -> Result<Option<String>, ContextIndexError> {
        self.root_lookups.fetch_add(1, Ordering::SeqCst);
        if ThreadLocalReadMode::is_active() {
            self.privileged_root_lookups.fetch_add(1, Ordering::SeqCst);
        }
        if let Some(message) = &self.root_error {
            return Err(ContextIndexError::Host(message.clone()));
        }
        Ok(self.root_path_key.clone())
    }
}

/// Mock crawler.
///
/// Excludes either everything, nothing, or a given set of indexable IDs.
#[derive(Debug, Default)]
pub struct MockCrawler {
    /// Exclude every indexable
    pub exclude_all: bool,
    /// Indexable IDs excluded individually
    pub excluded_ids: HashSet<String>,
    /// Path scope, for path-scoped crawlers
    pub path_scope: Option<MockPathScope>,
}

impl MockCrawler {
    /// A crawler that covers every indexable.
    pub fn covering() -> Self {
        Self::default()
    }

    /// A crawler that excludes every indexable.
    pub fn excluding() -> Self {
        Self {
            exclude_all: true,
            ..Self::default()
        }
    }

    /// A crawler that excludes the given indexable IDs.
    pub fn excluding_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Scope this crawler to the subtree at `root_path_key` in `database`.
    pub fn path_scoped(
        mut self,
        database: impl Into<String>,
        root_path_key: impl Into<String>,
    ) -> Self {
        self.path_scope = Some(MockPathScope {
            database: database.into(),
            root_path_key: Some(root_path_key.into()),
            ..MockPathScope::default()
        });
        self
    }

    /// Scope this crawler to `database` with a root item that does not exist.
    pub fn path_scoped_without_root(mut self, database: impl Into<String>) -> Self {
        self.path_scope = Some(MockPathScope {
            database: database.into(),
            ..MockPathScope::default()
        });
        self
    }

    /// Make root lookups fail with a host error.
    pub fn with_root_error(mut self, message: impl Into<String>) -> Self {
        let scope = self.path_scope.get_or_insert_with(MockPathScope::default);
        scope.root_error = Some(message.into());
        self
    }

    /// Number of root lookups, and how many of them ran privileged.
    pub fn root_lookup_counts(&self) -> (usize, usize) {
        self.path_scope
            .as_ref()
            .map(|scope| {
                (
                    scope.root_lookups.load(Ordering::SeqCst),
                    scope.privileged_root_lookups.load(Ordering::SeqCst),
                )
            })
            .unwrap_or((0, 0))
    }

    /// Wrap in an `Arc`.
    pub fn into_arc(self) -> Arc<MockCrawler> {
        Arc::new(self)
    }
}

impl Crawler for MockCrawler {
    fn is_excluded(&self, indexable: &dyn Indexable) -> bool {
        self.exclude_all || self.excluded_ids.contains(indexable.id())
    }

    fn kind(&self) -> CrawlerKind<'_> {
        match &self.path_scope {
            Some(scope) => CrawlerKind::PathScoped(scope),
            None => CrawlerKind::Other,
        }
    }
}

/// Mock search index.
pub struct MockIndex {
    /// Unique index name
    pub name: String,
    /// Implementation type
    pub index_type: IndexType,
    /// Initialization state; `None` for indexes without the concept
    pub initialized: Option<bool>,
    /// Crawlers feeding the index
    pub crawlers: Vec<Arc<dyn Crawler>>,
    /// Context rank; `None` when the index lacks the ranking capability
    pub rank: Option<i32>,
}

impl MockIndex {
    /// Create an index with no crawlers, no initialization concept and no
    /// ranking capability.
    pub fn new(name: impl Into<String>, index_type: IndexType) -> Self {
        Self {
            name: name.into(),
            index_type,
            initialized: None,
            crawlers: Vec::new(),
            rank: None,
        }
    }

    /// Add a crawler.
    pub fn with_crawler(mut self, crawler: impl Crawler + 'static) -> Self {
        self.crawlers.push(Arc::new(crawler));
        self
    }

    /// Add a shared crawler.
    pub fn with_shared_crawler(mut self, crawler: Arc<dyn Crawler>) -> Self {
        self.crawlers.push(crawler);
        self
    }

    /// Give the index the ranking capability with a fixed rank.
    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Give the index an initialization state.
    pub fn initialized(mut self, initialized: bool) -> Self {
        self.initialized = Some(initialized);
        self
    }

    /// Wrap in an `Arc<dyn SearchIndex>`.
    pub fn into_arc(self) -> Arc<dyn SearchIndex> {
        Arc::new(self)
    }
}

impl ContextIndexRankable for MockIndex {
    fn context_index_rank(&self, _indexable: &dyn Indexable) -> i32 {
        self.rank.unwrap_or(crate::types::UNRANKED)
    }
}

impl SearchIndex for MockIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn index_type(&self) -> IndexType {
        self.index_type
    }

    fn is_initialized(&self) -> Option<bool> {
        self.initialized
    }

    fn crawlers(&self) -> &[Arc<dyn Crawler>] {
        &self.crawlers
    }

    fn ranking(&self) -> Option<&dyn ContextIndexRankable> {
        self.rank.map(|_| self as &dyn ContextIndexRankable)
    }
}
