//! Context index resolution entry point.
//!
//! `ContextIndexResolver` runs the stages in order:
//! 1. Candidate filter over the registry snapshot
//! 2. Path-fallback locator, only when the filter found nothing
//! 3. Ranking
//! 4. Tie-breaking
//!
//! Resolution is total: every failure is logged and reported in the
//! returned [`Resolution`], never propagated to the caller.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use context_types::{
    ContextIndexError, IndexRegistry, IndexTypeRegistry, Indexable, ReadModeToggle,
    ResolverSettings, SearchIndex, SettingsProvider, ThreadLocalReadMode,
};

use crate::filter::active_candidates;
use crate::locator::path_related_indexes;
use crate::ranker::rank_candidates;
use crate::tiebreak::TieBreaker;
use crate::types::{CandidateSummary, Resolution, ResolutionDiagnostic, ResolutionSource};

/// Resolves the context index of an indexable.
///
/// Holds no per-call state; one resolver can serve concurrent callers.
pub struct ContextIndexResolver {
    registry: Arc<dyn IndexRegistry>,
    tie_breaker: TieBreaker,
    read_mode: Arc<dyn ReadModeToggle>,
}

impl ContextIndexResolver {
    /// Create a resolver with the builtin index type names and the
    /// thread-local read mode.
    pub fn new(registry: Arc<dyn IndexRegistry>, settings: Arc<dyn SettingsProvider>) -> Self {
        Self {
            registry,
            tie_breaker: TieBreaker::new(settings, IndexTypeRegistry::with_builtin()),
            read_mode: Arc::new(ThreadLocalReadMode::new()),
        }
    }

    /// Create a resolver from loaded settings, including their type aliases.
    pub fn from_settings(registry: Arc<dyn IndexRegistry>, settings: ResolverSettings) -> Self {
        let types = settings.type_registry();
        let mut resolver = Self::new(registry, Arc::new(settings));
        resolver.tie_breaker.set_type_registry(types);
        resolver
    }

    /// Use a different index type registry.
    pub fn with_type_registry(mut self, types: IndexTypeRegistry) -> Self {
        self.tie_breaker.set_type_registry(types);
        self
    }

    /// Use a host-supplied read mode toggle.
    pub fn with_read_mode(mut self, read_mode: Arc<dyn ReadModeToggle>) -> Self {
        self.read_mode = read_mode;
        self
    }

    /// Name of the context index for `indexable`, if any.
    pub fn resolve_context_index(&self, indexable: Option<&dyn Indexable>) -> Option<String> {
        self.resolve(indexable).into_index()
    }

    /// Resolve against a fresh registry snapshot, with the full report.
    pub fn resolve(&self, indexable: Option<&dyn Indexable>) -> Resolution {
        let Some(indexable) = indexable else {
            return Resolution::unresolved();
        };
        let indexes = self.registry.snapshot();
        self.resolve_in(indexable, &indexes)
    }

    /// Resolve against an explicit registry snapshot.
    pub fn resolve_in(
        &self,
        indexable: &dyn Indexable,
        indexes: &[Arc<dyn SearchIndex>],
    ) -> Resolution {
        match self.try_resolve(indexable, indexes) {
            Ok(resolution) => resolution,
            Err(ContextIndexError::InvalidState(message)) => {
                warn!(
                    indexable_id = indexable.id(),
                    error = %message,
                    "{} is excluded and cannot be covered by any index.",
                    indexable.absolute_path()
                );
                Resolution::failed(ResolutionDiagnostic::ExcludedWithNoPathOwner { message })
            }
            Err(err) => {
                error!(
                    indexable_id = indexable.id(),
                    path = indexable.absolute_path(),
                    error = %err,
                    "Context index resolution failed"
                );
                Resolution::failed(ResolutionDiagnostic::HostFailure {
                    message: err.to_string(),
                })
            }
        }
    }

    fn try_resolve(
        &self,
        indexable: &dyn Indexable,
        indexes: &[Arc<dyn SearchIndex>],
    ) -> Result<Resolution, ContextIndexError> {
        let mut source = ResolutionSource::Active;
        let mut candidates = active_candidates(indexes, indexable);
        if candidates.is_empty() {
            source = ResolutionSource::PathFallback;
            candidates = path_related_indexes(indexable, indexes, self.read_mode.as_ref())?;
        }
        debug!(
            indexable_id = indexable.id(),
            source = ?source,
            candidates = candidates.len(),
            "Collected candidate indexes"
        );

        let ranked = rank_candidates(candidates, indexable);
        let summaries: Vec<CandidateSummary> =
            ranked.iter().map(|candidate| candidate.summary()).collect();

        let Some(decision) = self.tie_breaker.select(&ranked) else {
            error!(
                indexable_id = indexable.id(),
                path = indexable.absolute_path(),
                "There is no appropriate index for {} - {}. You have to add an index crawler that will cover this item",
                indexable.absolute_path(),
                indexable.id()
            );
            return Ok(Resolution {
                source: Some(source),
                candidates: summaries,
                diagnostic: Some(ResolutionDiagnostic::NoCoverage),
                ..Resolution::default()
            });
        };

        info!(
            indexable_id = indexable.id(),
            index = decision.winner.name(),
            rank = decision.winner.rank,
            selection = ?decision.selection,
            "Resolved context index"
        );

        Ok(Resolution {
            index: Some(decision.winner.name().to_string()),
            source: Some(source),
            selection: Some(decision.selection),
            candidates: summaries,
            diagnostic: decision.diagnostic,
        })
    }
}
