//! Resolution types.
//!
//! - `RankedCandidate`: a candidate index paired with its rank
//! - `ResolutionSource`: which stage produced the candidates
//! - `Selection`: why the winning candidate was chosen
//! - `ResolutionDiagnostic`: why resolution failed or fell back
//! - `Resolution`: the full outcome of one resolution call

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use context_types::{IndexType, SearchIndex};

/// Rank given to indexes without the ranking capability.
pub const UNRANKED: i32 = i32::MAX;

/// A candidate index with its rank. Lower ranks win.
#[derive(Clone)]
pub struct RankedCandidate {
    /// The candidate index
    pub index: Arc<dyn SearchIndex>,

    /// Rank from the index's ranking capability, or [`UNRANKED`]
    pub rank: i32,
}

impl RankedCandidate {
    /// Create a ranked candidate.
    pub fn new(index: Arc<dyn SearchIndex>, rank: i32) -> Self {
        Self { index, rank }
    }

    /// Name of the candidate index.
    pub fn name(&self) -> &str {
        self.index.name()
    }

    /// Implementation type of the candidate index.
    pub fn index_type(&self) -> IndexType {
        self.index.index_type()
    }

    /// Returns true if the index provided its own rank.
    pub fn is_ranked(&self) -> bool {
        self.rank != UNRANKED
    }

    /// Serializable summary of this candidate.
    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            name: self.name().to_string(),
            index_type: self.index_type(),
            rank: self.rank,
        }
    }
}

impl fmt::Debug for RankedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankedCandidate")
            .field("name", &self.name())
            .field("index_type", &self.index_type())
            .field("rank", &self.rank)
            .finish()
    }
}

/// Summary of a ranked candidate, as reported in a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    /// Index name
    pub name: String,

    /// Index implementation type
    pub index_type: IndexType,

    /// Rank ([`UNRANKED`] when the index cannot rank itself)
    pub rank: i32,
}

/// Stage that produced the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Indexes whose crawlers actively cover the item
    Active,

    /// Indexes whose crawl roots contain the item's path
    PathFallback,
}

/// Reason the winning candidate was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Only one candidate
    Single,

    /// Best rank strictly lower than the runner-up
    ClearWinner,

    /// Tie broken by the configured default index type
    DefaultType {
        /// The configured type the winner matched
        index_type: IndexType,
    },

    /// Tie with no usable default type; first candidate in rank order
    FirstCandidate,
}

/// Diagnostic classification of a failed or ambiguous resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ResolutionDiagnostic {
    /// No index covers the item, actively or by path
    NoCoverage,

    /// The item is excluded everywhere and the item layer cannot produce it
    ExcludedWithNoPathOwner {
        /// Message of the invalid-state fault
        message: String,
    },

    /// A tie was broken without a usable default index type
    AmbiguousDefaultType {
        /// Configured default type name, possibly empty
        configured: String,

        /// The type it resolved to, if any
        resolved: Option<IndexType>,
    },

    /// Any other host collaborator failure
    HostFailure {
        /// Error message
        message: String,
    },
}

impl ResolutionDiagnostic {
    /// Returns true if this diagnostic left the item without a context index.
    pub fn is_failure(&self) -> bool {
        !matches!(self, ResolutionDiagnostic::AmbiguousDefaultType { .. })
    }
}

/// Outcome of one resolution call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Name of the context index, if one was found
    pub index: Option<String>,

    /// Stage that produced the candidates
    pub source: Option<ResolutionSource>,

    /// Why the winner was chosen
    pub selection: Option<Selection>,

    /// Ranked candidates, best first
    #[serde(default)]
    pub candidates: Vec<CandidateSummary>,

    /// Failure or fallback diagnostic
    pub diagnostic: Option<ResolutionDiagnostic>,
}

impl Resolution {
    /// Outcome for a missing indexable: no index and no diagnostic.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Failed outcome with a diagnostic.
    pub fn failed(diagnostic: ResolutionDiagnostic) -> Self {
        Self {
            diagnostic: Some(diagnostic),
            ..Self::default()
        }
    }

    /// Returns true if a context index was found.
    pub fn is_resolved(&self) -> bool {
        self.index.is_some()
    }

    /// The context index name, consuming the outcome.
    pub fn into_index(self) -> Option<String> {
        self.index
    }
}
