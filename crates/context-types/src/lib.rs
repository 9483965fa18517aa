//! # context-types
//!
//! Shared types for context index resolution.
//!
//! This crate defines what the resolver consumes from its host:
//! - Indexables: the content items being resolved
//! - Search indexes and crawlers, with their optional capabilities
//! - Index types and the name registry for the default index type setting
//! - The privileged read mode toggle and its scope guard
//! - Settings and the settings provider
//!
//! ## Usage
//!
//! ```rust
//! use context_types::{IndexType, IndexTypeRegistry};
//!
//! let registry = IndexTypeRegistry::with_builtin();
//! assert_eq!(registry.resolve("Lucene"), Some(IndexType::Lucene));
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod index_type;
pub mod indexable;
pub mod read_mode;

pub use config::{ResolverSettings, SettingsProvider, DEFAULT_INDEX_TYPE_SETTING};
pub use error::ContextIndexError;
pub use index::{
    ContextIndexRankable, Crawler, CrawlerKind, IndexRegistry, PathScopedCrawler, SearchIndex,
};
pub use index_type::{IndexType, IndexTypeRegistry};
pub use indexable::{Indexable, ItemLocation};
pub use read_mode::{ReadMode, ReadModeToggle, ReadScope, ThreadLocalReadMode};
