//! Tie-breaking among ranked candidates.
//!
//! The ranked list is classified into one of four states:
//!
//! | State         | Condition                          | Winner                     |
//! |---------------|------------------------------------|----------------------------|
//! | `Empty`       | no candidates                      | none                       |
//! | `Single`      | one candidate                      | that candidate             |
//! | `ClearWinner` | best rank < second-best rank       | best candidate             |
//! | `Tied`        | best rank == second-best rank      | default index type, else first |
//!
//! Only the first two entries decide whether there is a tie. Once tied, the
//! default index type filter runs over the whole ranked list, not just the
//! entries sharing the best rank.

use std::sync::Arc;

use tracing::debug;

use context_types::{IndexTypeRegistry, SettingsProvider, DEFAULT_INDEX_TYPE_SETTING};

use crate::types::{RankedCandidate, ResolutionDiagnostic, Selection};

/// Classification of a ranked candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieState {
    Empty,
    Single,
    ClearWinner,
    Tied,
}

impl TieState {
    /// Classify `ranked`, which must be sorted best first.
    pub fn classify(ranked: &[RankedCandidate]) -> Self {
        match ranked {
            [] => TieState::Empty,
            [_] => TieState::Single,
            [best, second, ..] if best.rank < second.rank => TieState::ClearWinner,
            _ => TieState::Tied,
        }
    }
}

/// Winner chosen by the [`TieBreaker`].
#[derive(Debug, Clone)]
pub struct Decision<'a> {
    /// The winning candidate
    pub winner: &'a RankedCandidate,

    /// Why it won
    pub selection: Selection,

    /// Set when a tie could not be broken by the default index type
    pub diagnostic: Option<ResolutionDiagnostic>,
}

/// Picks the context index from a ranked candidate list.
///
/// The default index type setting is read on every tie, so changes in the
/// settings provider apply to the next resolution.
pub struct TieBreaker {
    settings: Arc<dyn SettingsProvider>,
    types: IndexTypeRegistry,
}

impl TieBreaker {
    /// Create a tie-breaker.
    pub fn new(settings: Arc<dyn SettingsProvider>, types: IndexTypeRegistry) -> Self {
        Self { settings, types }
    }

    /// Replace the index type registry.
    pub fn set_type_registry(&mut self, types: IndexTypeRegistry) {
        self.types = types;
    }

    /// Select the winner, or `None` when there are no candidates.
    pub fn select<'a>(&self, ranked: &'a [RankedCandidate]) -> Option<Decision<'a>> {
        let state = TieState::classify(ranked);
        debug!(state = ?state, candidates = ranked.len(), "Classified ranked candidates");

        match state {
            TieState::Empty => None,
            TieState::Single => Some(Decision {
                winner: &ranked[0],
                selection: Selection::Single,
                diagnostic: None,
            }),
            TieState::ClearWinner => Some(Decision {
                winner: &ranked[0],
                selection: Selection::ClearWinner,
                diagnostic: None,
            }),
            TieState::Tied => Some(self.break_tie(ranked)),
        }
    }

    fn break_tie<'a>(&self, ranked: &'a [RankedCandidate]) -> Decision<'a> {
        let configured = self.settings.get_setting(DEFAULT_INDEX_TYPE_SETTING, "");
        let resolved = self.types.resolve(&configured);

        let preferred = resolved.and_then(|index_type| {
            ranked
                .iter()
                .filter(|candidate| candidate.index_type() == index_type)
                .min_by(|a, b| a.name().cmp(b.name()))
                .map(|winner| (winner, index_type))
        });

        match preferred {
            Some((winner, index_type)) => {
                debug!(
                    index = winner.name(),
                    index_type = %index_type,
                    "Tie broken by default index type"
                );
                Decision {
                    winner,
                    selection: Selection::DefaultType { index_type },
                    diagnostic: None,
                }
            }
            None => {
                debug!(
                    configured = %configured,
                    resolved = ?resolved,
                    index = ranked[0].name(),
                    "No usable default index type, using first candidate"
                );
                Decision {
                    winner: &ranked[0],
                    selection: Selection::FirstCandidate,
                    diagnostic: Some(ResolutionDiagnostic::AmbiguousDefaultType {
                        configured,
                        resolved,
                    }),
                }
            }
        }
    }
}
