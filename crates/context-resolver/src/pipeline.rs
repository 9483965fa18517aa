//! Context index pipeline.
//!
//! Hosts resolve context indexes through an ordered list of processors. A
//! processor only fills in the result when no earlier processor has.

use tracing::debug;

use context_types::Indexable;

use crate::resolver::ContextIndexResolver;

/// Arguments passed along the context index pipeline.
pub struct GetContextIndexArgs<'a> {
    /// Item being resolved
    pub indexable: Option<&'a dyn Indexable>,

    /// Context index name, once determined
    pub result: Option<String>,
}

impl<'a> GetContextIndexArgs<'a> {
    /// Create arguments for `indexable` with no result yet.
    pub fn new(indexable: Option<&'a dyn Indexable>) -> Self {
        Self {
            indexable,
            result: None,
        }
    }
}

/// A step of the context index pipeline.
pub trait ContextIndexProcessor: Send + Sync {
    /// Process the arguments, setting `args.result` if appropriate.
    fn process(&self, args: &mut GetContextIndexArgs<'_>);
}

/// Fetches the context index with a [`ContextIndexResolver`].
impl ContextIndexProcessor for ContextIndexResolver {
    fn process(&self, args: &mut GetContextIndexArgs<'_>) {
        if args.result.is_none() {
            args.result = self.resolve_context_index(args.indexable);
        }
    }
}

/// Ordered list of context index processors.
#[derive(Default)]
pub struct ContextIndexPipeline {
    processors: Vec<Box<dyn ContextIndexProcessor>>,
}

impl ContextIndexPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor.
    pub fn with_processor(mut self, processor: impl ContextIndexProcessor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Number of processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Returns true if the pipeline has no processors.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Run every processor over `args`.
    pub fn run(&self, args: &mut GetContextIndexArgs<'_>) {
        for processor in &self.processors {
            processor.process(args);
        }
        debug!(result = ?args.result, "Context index pipeline finished");
    }

    /// Run the pipeline for `indexable` and return the context index name.
    pub fn context_index(&self, indexable: Option<&dyn Indexable>) -> Option<String> {
        let mut args = GetContextIndexArgs::new(indexable);
        self.run(&mut args);
        args.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::mock::{MockCrawler, MockIndex, MockIndexable};
    use context_types::{IndexType, SearchIndex};

    struct Pinned(&'static str);

    impl ContextIndexProcessor for Pinned {
        fn process(&self, args: &mut GetContextIndexArgs<'_>) {
            if args.result.is_none() {
                args.result = Some(self.0.to_string());
            }
        }
    }

    struct Counting(Arc<AtomicUsize>);

    impl ContextIndexProcessor for Counting {
        fn process(&self, _args: &mut GetContextIndexArgs<'_>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn resolver() -> ContextIndexResolver {
        let indexes: Vec<Arc<dyn SearchIndex>> = vec![MockIndex::new("master_index", IndexType::Lucene)
            .with_crawler(MockCrawler::covering())
            .into_arc()];
        ContextIndexResolver::new(Arc::new(indexes), Arc::new(HashMap::<String, String>::new()))
    }

    #[test]
    fn test_resolver_fills_empty_result() {
        let item = MockIndexable::new("{A}", "/content");
        let mut args = GetContextIndexArgs::new(Some(&item));
        resolver().process(&mut args);
        assert_eq!(args.result.as_deref(), Some("master_index"));
    }

    #[test]
    fn test_existing_result_is_kept() {
        let item = MockIndexable::new("{A}", "/content");
        let pipeline = ContextIndexPipeline::new()
            .with_processor(Pinned("pinned_index"))
            .with_processor(resolver());
        assert_eq!(pipeline.len(), 2);
        assert_eq!(
            pipeline.context_index(Some(&item)).as_deref(),
            Some("pinned_index")
        );
    }

    #[test]
    fn test_every_processor_runs() {
        let count = Arc::new(AtomicUsize::new(0));
        let item = MockIndexable::new("{A}", "/content");
        let pipeline = ContextIndexPipeline::new()
            .with_processor(resolver())
            .with_processor(Counting(count.clone()));
        assert_eq!(
            pipeline.context_index(Some(&item)).as_deref(),
            Some("master_index")
        );
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_indexable_leaves_result_empty() {
        let pipeline = ContextIndexPipeline::new().with_processor(resolver());
        assert_eq!(pipeline.context_index(None), None);
    }
}
