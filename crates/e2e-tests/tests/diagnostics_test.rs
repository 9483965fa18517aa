//! Diagnostics E2E tests.
//!
//! Failed resolutions must be reported through tracing at the right level
//! and identify the item, while successful ones stay quiet above info.

use context_resolver::mock::MockIndexable;
use context_types::IndexType;

use e2e_tests::{capture_logs, covering_index, excluding_index, home_item, TestHarness};

#[test]
fn test_no_coverage_logs_error_with_path_and_id() {
    let harness = TestHarness::new();
    let resolver = harness.resolver();
    let item = home_item();

    let (result, logs) = capture_logs(|| resolver.resolve_context_index(Some(&item)));

    assert_eq!(result, None);
    assert!(logs.contains("ERROR"), "expected an error event, got: {logs}");
    assert!(
        logs.contains(
            "There is no appropriate index for /content/home - {110D559F-DEA5-42EA-9C1C-8A5DF7E70EF9}"
        ),
        "error should name the item path and id, got: {logs}"
    );
}

#[test]
fn test_excluded_item_logs_warning() {
    let harness = TestHarness::new();
    harness.register(excluding_index("master_index", IndexType::Lucene));
    let resolver = harness.resolver();
    let item = MockIndexable::new("{DEAD}", "/content/removed").with_invalid_state("item removed");

    let (result, logs) = capture_logs(|| resolver.resolve_context_index(Some(&item)));

    assert_eq!(result, None);
    assert!(logs.contains("WARN"), "expected a warning event, got: {logs}");
    assert!(logs.contains("/content/removed is excluded and cannot be covered by any index."));
    assert!(!logs.contains("ERROR"));
}

#[test]
fn test_missing_indexable_is_silent() {
    let harness = TestHarness::new();
    let resolver = harness.resolver();

    let (result, logs) = capture_logs(|| resolver.resolve_context_index(None));

    assert_eq!(result, None);
    assert!(logs.is_empty(), "no diagnostics expected, got: {logs}");
}

#[test]
fn test_success_logs_no_warnings_or_errors() {
    let harness = TestHarness::new();
    harness.register(covering_index("master_index", IndexType::Lucene));
    let resolver = harness.resolver();
    let item = home_item();

    let (result, logs) = capture_logs(|| resolver.resolve_context_index(Some(&item)));

    assert_eq!(result.as_deref(), Some("master_index"));
    assert!(logs.contains("Resolved context index"));
    assert!(!logs.contains("WARN"));
    assert!(!logs.contains("ERROR"));
}
