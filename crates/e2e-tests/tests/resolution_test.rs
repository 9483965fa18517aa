//! Resolution E2E tests.
//!
//! Drive the full resolver (registry snapshot, candidate filter, path
//! fallback, ranking, tie-breaking) through the scenarios a host hits in
//! practice.

use pretty_assertions::assert_eq;

use context_resolver::mock::{MockCrawler, MockIndex, MockIndexable};
use context_resolver::{
    ContextIndexPipeline, ResolutionDiagnostic, ResolutionSource, Selection, UNRANKED,
};
use context_types::IndexType;

use e2e_tests::{
    covering_index, excluding_index, home_item, TestHarness, CONTENT_ROOT, MASTER_DB, MEDIA_ROOT,
};

/// Excluded everywhere, but idx1 crawls the subtree holding the item.
#[test]
fn test_path_owner_resolves_excluded_item() {
    let harness = TestHarness::new();
    harness.register(
        MockIndex::new("idx1", IndexType::Lucene)
            .with_crawler(MockCrawler::excluding().path_scoped(MASTER_DB, CONTENT_ROOT)),
    );
    harness.register(
        MockIndex::new("idx2", IndexType::Lucene)
            .with_crawler(MockCrawler::excluding().path_scoped(MASTER_DB, MEDIA_ROOT)),
    );

    let item = home_item();
    let resolution = harness.resolver().resolve(Some(&item));

    assert_eq!(resolution.index.as_deref(), Some("idx1"));
    assert_eq!(resolution.source, Some(ResolutionSource::PathFallback));
    assert_eq!(resolution.selection, Some(Selection::Single));
}

/// Lower rank wins.
#[test]
fn test_lower_rank_wins() {
    let harness = TestHarness::new();
    harness.register(covering_index("IdxA", IndexType::Lucene).with_rank(5));
    harness.register(covering_index("IdxB", IndexType::Lucene).with_rank(3));

    let item = home_item();
    let resolution = harness.resolver().resolve(Some(&item));

    assert_eq!(resolution.index.as_deref(), Some("IdxB"));
    assert_eq!(resolution.selection, Some(Selection::ClearWinner));
}

/// Equal ranks fall back to the default index type.
#[test]
fn test_tie_uses_default_index_type() {
    let setup = |harness: &TestHarness| {
        harness.register(covering_index("IdxA", IndexType::Lucene).with_rank(5));
        harness.register(covering_index("IdxB", IndexType::Solr).with_rank(5));
    };
    let item = home_item();

    let solr = TestHarness::new().with_default_index_type("Solr");
    setup(&solr);
    assert_eq!(
        solr.resolver().resolve_context_index(Some(&item)).as_deref(),
        Some("IdxB")
    );

    let unset = TestHarness::new().with_default_index_type("");
    setup(&unset);
    let resolution = unset.resolver().resolve(Some(&item));
    assert_eq!(resolution.index.as_deref(), Some("IdxA"));
    assert_eq!(resolution.selection, Some(Selection::FirstCandidate));
    assert!(resolution.is_resolved());
    assert!(matches!(
        resolution.diagnostic,
        Some(ResolutionDiagnostic::AmbiguousDefaultType { .. })
    ));
    assert!(!resolution.diagnostic.as_ref().is_some_and(|d| d.is_failure()));
}

/// Empty registry.
#[test]
fn test_empty_registry_resolves_nothing() {
    let harness = TestHarness::new();
    let item = home_item();
    let resolution = harness.resolver().resolve(Some(&item));

    assert_eq!(resolution.index, None);
    assert_eq!(resolution.diagnostic, Some(ResolutionDiagnostic::NoCoverage));
    assert!(resolution.candidates.is_empty());
}

#[test]
fn test_single_covering_index_wins() {
    let harness = TestHarness::new();
    harness.register(excluding_index("master_index", IndexType::Lucene));
    harness.register(covering_index("web_index", IndexType::Solr));
    harness.register(excluding_index("core_index", IndexType::Cloud));

    let item = home_item();
    assert_eq!(
        harness.resolver().resolve_context_index(Some(&item)).as_deref(),
        Some("web_index")
    );
}

#[test]
fn test_strict_winner_ignores_default_type() {
    for default_type in ["", "Lucene", "Solr", "Cloud", "Unknown"] {
        let harness = TestHarness::new().with_default_index_type(default_type);
        harness.register(covering_index("solr_index", IndexType::Solr).with_rank(2));
        harness.register(covering_index("lucene_index", IndexType::Lucene).with_rank(1));

        let item = home_item();
        assert_eq!(
            harness.resolver().resolve_context_index(Some(&item)).as_deref(),
            Some("lucene_index"),
            "default type {:?} should not affect a strict winner",
            default_type
        );
    }
}

#[test]
fn test_unresolvable_default_type_takes_first_in_rank_order() {
    let harness = TestHarness::new().with_default_index_type("NoSuchProvider.Index");
    harness.register(covering_index("B_first", IndexType::Solr).with_rank(1));
    harness.register(covering_index("A_second", IndexType::Lucene).with_rank(1));

    let item = home_item();
    assert_eq!(
        harness.resolver().resolve_context_index(Some(&item)).as_deref(),
        Some("B_first")
    );
}

#[test]
fn test_qualified_type_name_breaks_tie() {
    let harness = TestHarness::new().with_default_index_type("SolrProvider.SolrSearchIndex");
    harness.register(covering_index("lucene_index", IndexType::Lucene));
    harness.register(covering_index("solr_index", IndexType::Solr));

    let item = home_item();
    let resolution = harness.resolver().resolve(Some(&item));
    assert_eq!(resolution.index.as_deref(), Some("solr_index"));
    assert_eq!(
        resolution.selection,
        Some(Selection::DefaultType {
            index_type: IndexType::Solr
        })
    );
    // Neither index ranks itself
    assert!(resolution
        .candidates
        .iter()
        .all(|candidate| candidate.rank == UNRANKED));
}

#[test]
fn test_duplicate_registrations_do_not_double_count() {
    let harness = TestHarness::new().with_default_index_type("Solr");
    let shared = covering_index("master_index", IndexType::Lucene)
        .with_rank(1)
        .into_arc();
    harness.registry.register(shared.clone());
    harness.registry.register(shared);

    let item = home_item();
    let resolution = harness.resolver().resolve(Some(&item));

    // One candidate, so no tie to break
    assert_eq!(resolution.candidates.len(), 1);
    assert_eq!(resolution.selection, Some(Selection::Single));
    assert_eq!(resolution.index.as_deref(), Some("master_index"));
}

#[test]
fn test_uninitialized_index_is_not_a_candidate() {
    let harness = TestHarness::new();
    harness.register(
        covering_index("cold_index", IndexType::Lucene)
            .initialized(false)
            .with_rank(0),
    );
    harness.register(
        covering_index("warm_index", IndexType::Lucene)
            .initialized(true)
            .with_rank(10),
    );

    let item = home_item();
    assert_eq!(
        harness.resolver().resolve_context_index(Some(&item)).as_deref(),
        Some("warm_index")
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let harness = TestHarness::new().with_default_index_type("Cloud");
    harness.register(covering_index("a", IndexType::Lucene).with_rank(4));
    harness.register(covering_index("b", IndexType::Cloud).with_rank(4));
    harness.register(covering_index("c", IndexType::Cloud).with_rank(4));
    harness.register(covering_index("d", IndexType::Solr));

    let resolver = harness.resolver();
    let item = home_item();
    let first = resolver.resolve(Some(&item));
    for _ in 0..10 {
        assert_eq!(resolver.resolve(Some(&item)), first);
    }
    assert_eq!(first.index.as_deref(), Some("b"));
}

#[test]
fn test_registry_changes_apply_to_next_call() {
    let harness = TestHarness::new();
    let resolver = harness.resolver();
    let item = home_item();

    assert_eq!(resolver.resolve_context_index(Some(&item)), None);

    harness.register(covering_index("late_index", IndexType::Lucene));
    assert_eq!(
        resolver.resolve_context_index(Some(&item)).as_deref(),
        Some("late_index")
    );

    harness.registry.remove("late_index");
    assert_eq!(resolver.resolve_context_index(Some(&item)), None);
}

#[test]
fn test_excluded_item_without_path_owner_is_absorbed() {
    let harness = TestHarness::new();
    harness.register(excluding_index("master_index", IndexType::Lucene));

    let item = MockIndexable::new("{DEAD}", "/content/removed")
        .with_invalid_state("item no longer exists in database master");
    let resolution = harness.resolver().resolve(Some(&item));

    assert!(!resolution.is_resolved());
    assert!(matches!(
        resolution.diagnostic,
        Some(ResolutionDiagnostic::ExcludedWithNoPathOwner { .. })
    ));
    assert!(resolution.diagnostic.as_ref().is_some_and(|d| d.is_failure()));
}

#[test]
fn test_non_path_indexable_excluded_everywhere() {
    let harness = TestHarness::new();
    harness.register(
        MockIndex::new("idx1", IndexType::Lucene)
            .with_crawler(MockCrawler::excluding().path_scoped(MASTER_DB, CONTENT_ROOT)),
    );

    let item = MockIndexable::new("{EXT}", "external://document/42");
    let resolution = harness.resolver().resolve(Some(&item));
    assert_eq!(resolution.index, None);
    assert_eq!(resolution.diagnostic, Some(ResolutionDiagnostic::NoCoverage));
}

#[test]
fn test_path_fallback_candidates_are_ranked() {
    let harness = TestHarness::new();
    harness.register(
        MockIndex::new("broad", IndexType::Lucene)
            .with_rank(9)
            .with_crawler(MockCrawler::excluding().path_scoped(MASTER_DB, CONTENT_ROOT)),
    );
    harness.register(
        MockIndex::new("narrow", IndexType::Lucene)
            .with_rank(1)
            .with_crawler(MockCrawler::excluding().path_scoped("MASTER", e2e_tests::HOME)),
    );

    let item = home_item();
    let resolution = harness.resolver().resolve(Some(&item));
    assert_eq!(resolution.index.as_deref(), Some("narrow"));
    assert_eq!(resolution.source, Some(ResolutionSource::PathFallback));
    assert_eq!(resolution.candidates.len(), 2);
}

#[test]
fn test_pipeline_sets_result_once() {
    let harness = TestHarness::new();
    harness.register(covering_index("master_index", IndexType::Lucene));

    let pipeline = ContextIndexPipeline::new()
        .with_processor(harness.resolver())
        .with_processor(harness.resolver());

    let item = home_item();
    assert_eq!(
        pipeline.context_index(Some(&item)).as_deref(),
        Some("master_index")
    );
}

#[test]
fn test_resolution_report_serializes() {
    let harness = TestHarness::new().with_default_index_type("Solr");
    harness.register(covering_index("IdxA", IndexType::Lucene).with_rank(5));
    harness.register(covering_index("IdxB", IndexType::Solr).with_rank(5));

    let item = home_item();
    let resolution = harness.resolver().resolve(Some(&item));
    let json = serde_json::to_value(&resolution).unwrap();

    assert_eq!(json["index"], "IdxB");
    assert_eq!(json["source"], "active");
    assert_eq!(json["candidates"][0]["name"], "IdxA");
    assert_eq!(json["candidates"][1]["index_type"], "solr");
}
