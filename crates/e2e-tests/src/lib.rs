//! End-to-end test infrastructure for context index resolution.
//!
//! Provides a shared TestHarness and helper functions for E2E tests
//! covering registry, settings, resolver and pipeline together.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use context_resolver::mock::{MockCrawler, MockIndex, MockIndexable};
use context_resolver::{ContextIndexResolver, InMemoryIndexRegistry};
use context_types::{IndexType, DEFAULT_INDEX_TYPE_SETTING};

/// Database used by the test items.
pub const MASTER_DB: &str = "master";

/// Path key of the content root.
pub const CONTENT_ROOT: &str =
    "/{11111111-1111-1111-1111-111111111111}/{0DE95AE4-41AB-4D01-9EB0-67441B7C2450}";

/// Path key of the home item, under the content root.
pub const HOME: &str = "/{11111111-1111-1111-1111-111111111111}/{0DE95AE4-41AB-4D01-9EB0-67441B7C2450}/{110D559F-DEA5-42EA-9C1C-8A5DF7E70EF9}";

/// Path key of the media library root, outside the content root.
pub const MEDIA_ROOT: &str =
    "/{11111111-1111-1111-1111-111111111111}/{3D6658D8-A0BF-4E75-B3E2-D050FABCF4E1}";

/// Shared test harness for E2E tests.
///
/// Holds an in-memory registry and the settings handed to every resolver
/// it builds.
pub struct TestHarness {
    /// Registry shared with resolvers built by this harness
    pub registry: Arc<InMemoryIndexRegistry>,
    /// Settings served to the resolver
    pub settings: HashMap<String, String>,
}

impl TestHarness {
    /// Create a harness with an empty registry and no settings.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryIndexRegistry::new()),
            settings: HashMap::new(),
        }
    }

    /// Set the default index type setting.
    pub fn with_default_index_type(mut self, name: &str) -> Self {
        self.settings
            .insert(DEFAULT_INDEX_TYPE_SETTING.to_string(), name.to_string());
        self
    }

    /// Register an index.
    pub fn register(&self, index: MockIndex) {
        self.registry.register(index.into_arc());
    }

    /// Build a resolver over the harness registry and settings.
    pub fn resolver(&self) -> ContextIndexResolver {
        ContextIndexResolver::new(self.registry.clone(), Arc::new(self.settings.clone()))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// An index whose single crawler covers everything.
pub fn covering_index(name: &str, index_type: IndexType) -> MockIndex {
    MockIndex::new(name, index_type).with_crawler(MockCrawler::covering())
}

/// An index whose single crawler excludes everything.
pub fn excluding_index(name: &str, index_type: IndexType) -> MockIndex {
    MockIndex::new(name, index_type).with_crawler(MockCrawler::excluding())
}

/// An indexable for the home item in the master database.
pub fn home_item() -> MockIndexable {
    MockIndexable::new(
        "{110D559F-DEA5-42EA-9C1C-8A5DF7E70EF9}",
        "/content/home",
    )
    .with_item(MASTER_DB, HOME)
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a capturing subscriber and return its result with the logs.
///
/// Logs are plain text, one event per line, at every level.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap_or_else(PoisonError::into_inner))
        .into_owned();
    (result, logs)
}
