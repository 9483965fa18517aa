//! Index implementation types and the name registry used to resolve them.
//!
//! The default index type setting names an implementation type. Names are
//! resolved through an [`IndexTypeRegistry`] to one of the known
//! [`IndexType`] variants; unknown names resolve to nothing.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Concrete search index implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    /// Local Lucene index
    Lucene,

    /// Lucene index that rebuilds into a secondary directory and swaps
    SwitchOnRebuildLucene,

    /// Solr core
    Solr,

    /// Solr core that rebuilds into a secondary core and swaps
    SwitchOnRebuildSolr,

    /// Hosted cloud search index
    Cloud,

    /// Hosted cloud search index that rebuilds into a secondary index and swaps
    SwitchOnRebuildCloud,
}

impl IndexType {
    /// All known implementation types.
    pub const ALL: [IndexType; 6] = [
        IndexType::Lucene,
        IndexType::SwitchOnRebuildLucene,
        IndexType::Solr,
        IndexType::SwitchOnRebuildSolr,
        IndexType::Cloud,
        IndexType::SwitchOnRebuildCloud,
    ];

    /// Short configuration name, e.g. `Solr`.
    pub fn short_name(&self) -> &'static str {
        match self {
            IndexType::Lucene => "Lucene",
            IndexType::SwitchOnRebuildLucene => "SwitchOnRebuildLucene",
            IndexType::Solr => "Solr",
            IndexType::SwitchOnRebuildSolr => "SwitchOnRebuildSolr",
            IndexType::Cloud => "Cloud",
            IndexType::SwitchOnRebuildCloud => "SwitchOnRebuildCloud",
        }
    }

    /// Provider-qualified type name, e.g. `SolrProvider.SolrSearchIndex`.
    pub fn qualified_name(&self) -> &'static str {
        match self {
            IndexType::Lucene => "LuceneProvider.LuceneIndex",
            IndexType::SwitchOnRebuildLucene => "LuceneProvider.SwitchOnRebuildLuceneIndex",
            IndexType::Solr => "SolrProvider.SolrSearchIndex",
            IndexType::SwitchOnRebuildSolr => "SolrProvider.SwitchOnRebuildSolrSearchIndex",
            IndexType::Cloud => "CloudProvider.CloudSearchProviderIndex",
            IndexType::SwitchOnRebuildCloud => {
                "CloudProvider.SwitchOnRebuildCloudSearchProviderIndex"
            }
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Maps configuration strings to index implementation types.
///
/// Lookups trim surrounding whitespace and match registered names exactly.
/// Names added with [`register_folded`](Self::register_folded) also match
/// ignoring ASCII case, since config files deliver keys lowercased.
/// An empty name never resolves.
///
/// # Example
///
/// ```
/// use context_types::{IndexType, IndexTypeRegistry};
///
/// let registry = IndexTypeRegistry::with_builtin().with_alias("primary", IndexType::Solr);
/// assert_eq!(registry.resolve("Solr"), Some(IndexType::Solr));
/// assert_eq!(registry.resolve("primary"), Some(IndexType::Solr));
/// assert_eq!(registry.resolve(""), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexTypeRegistry {
    names: HashMap<String, IndexType>,
    /// Case-insensitive names, keyed lowercase
    folded: HashMap<String, IndexType>,
}

impl IndexTypeRegistry {
    /// Create an empty registry that resolves nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the short and qualified name of every known type.
    pub fn with_builtin() -> Self {
        let mut names = HashMap::with_capacity(IndexType::ALL.len() * 2);
        for index_type in IndexType::ALL {
            names.insert(index_type.short_name().to_string(), index_type);
            names.insert(index_type.qualified_name().to_string(), index_type);
        }
        Self {
            names,
            folded: HashMap::new(),
        }
    }

    /// Register an additional name for `index_type`.
    ///
    /// An existing mapping for the same name is replaced.
    pub fn with_alias(mut self, name: impl Into<String>, index_type: IndexType) -> Self {
        self.register(name, index_type);
        self
    }

    /// Register an additional name for `index_type` in place.
    pub fn register(&mut self, name: impl Into<String>, index_type: IndexType) {
        let name = name.into();
        let name = name.trim();
        if !name.is_empty() {
            self.names.insert(name.to_string(), index_type);
        }
    }

    /// Register a name for `index_type` that matches regardless of case.
    pub fn register_folded(&mut self, name: &str, index_type: IndexType) {
        let name = name.trim();
        if !name.is_empty() {
            self.folded.insert(name.to_lowercase(), index_type);
        }
    }

    /// Resolve a configured type name.
    ///
    /// Exact names take precedence over case-insensitive ones.
    pub fn resolve(&self, name: &str) -> Option<IndexType> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.names
            .get(name)
            .or_else(|| self.folded.get(&name.to_lowercase()))
            .copied()
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len() + self.folded.len()
    }

    /// Returns true if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.folded.is_empty()
    }
}
