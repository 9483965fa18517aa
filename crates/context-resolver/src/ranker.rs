//! Candidate ranking.

use std::sync::Arc;

use context_types::{Indexable, SearchIndex};

use crate::filter::distinct_by_name;
use crate::types::{RankedCandidate, UNRANKED};

/// Rank candidates for `indexable`, best first.
///
/// Candidates are de-duplicated by name before ranking. Indexes without the
/// ranking capability get [`UNRANKED`]. The sort is stable, so equal ranks
/// keep their input order.
pub fn rank_candidates(
    candidates: Vec<Arc<dyn SearchIndex>>,
    indexable: &dyn Indexable,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = distinct_by_name(candidates)
        .into_iter()
        .map(|index| {
            let rank = index
                .ranking()
                .map(|ranking| ranking.context_index_rank(indexable))
                .unwrap_or(UNRANKED);
            RankedCandidate::new(index, rank)
        })
        .collect();

    ranked.sort_by_key(|candidate| candidate.rank);
    ranked
}
