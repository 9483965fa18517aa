//! # context-resolver
//!
//! Resolves which search index is the context index of a content item.
//!
//! Several indexes may claim the same item. This crate decides between them
//! deterministically, reading only the registry snapshot and the settings
//! supplied by the host.
//!
//! ## Stages
//!
//! 1. **Candidate filter** ([`filter`]): eligible indexes with a crawler that
//!    does not exclude the item
//! 2. **Path fallback** ([`locator`]): when nothing covers the item, indexes
//!    whose path-scoped crawler is rooted above it
//! 3. **Ranking** ([`ranker`]): optional per-index rank, lower wins
//! 4. **Tie-breaking** ([`tiebreak`]): the configured default index type,
//!    else the first candidate
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use context_resolver::mock::{MockCrawler, MockIndex, MockIndexable};
//! use context_resolver::{ContextIndexResolver, InMemoryIndexRegistry};
//! use context_types::{IndexType, DEFAULT_INDEX_TYPE_SETTING};
//!
//! let registry = InMemoryIndexRegistry::new();
//! registry.register(
//!     MockIndex::new("lucene_index", IndexType::Lucene)
//!         .with_crawler(MockCrawler::covering())
//!         .into_arc(),
//! );
//! registry.register(
//!     MockIndex::new("solr_index", IndexType::Solr)
//!         .with_crawler(MockCrawler::covering())
//!         .into_arc(),
//! );
//!
//! let mut settings = HashMap::new();
//! settings.insert(DEFAULT_INDEX_TYPE_SETTING.to_string(), "Solr".to_string());
//!
//! let resolver = ContextIndexResolver::new(Arc::new(registry), Arc::new(settings));
//! let item = MockIndexable::new("{A}", "/content/home");
//! assert_eq!(
//!     resolver.resolve_context_index(Some(&item)).as_deref(),
//!     Some("solr_index")
//! );
//! ```

pub mod filter;
pub mod locator;
pub mod logging;
pub mod mock;
pub mod pipeline;
pub mod ranker;
pub mod registry;
pub mod resolver;
pub mod tiebreak;
pub mod types;

pub use filter::{active_candidates, distinct_by_name};
pub use locator::path_related_indexes;
pub use logging::init_logging;
pub use pipeline::{ContextIndexPipeline, ContextIndexProcessor, GetContextIndexArgs};
pub use ranker::rank_candidates;
pub use registry::InMemoryIndexRegistry;
pub use resolver::ContextIndexResolver;
pub use tiebreak::{Decision, TieBreaker, TieState};
pub use types::{
    CandidateSummary, RankedCandidate, Resolution, ResolutionDiagnostic, ResolutionSource,
    Selection, UNRANKED,
};
