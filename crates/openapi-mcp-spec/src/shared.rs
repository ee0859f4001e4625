//! Thread-safe handle around a [`SpecProcessor`].

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::SpecError;
use crate::model::{Endpoint, Info};
use crate::processor::SpecProcessor;

/// A [`SpecProcessor`] behind a single-writer/multi-reader lock.
///
/// Loads take the write lock for their whole duration, including the
/// network fetch, so readers never observe a half-finished load.
#[derive(Debug, Clone, Default)]
pub struct SharedSpecProcessor {
    inner: Arc<RwLock<SpecProcessor>>,
}

impl SharedSpecProcessor {
    pub fn new(processor: SpecProcessor) -> Self {
        Self {
            inner: Arc::new(RwLock::new(processor)),
        }
    }

    /// Load a path or URL, replacing the current document.
    pub fn load(&self, source: &str) -> Result<Info, SpecError> {
        let mut processor = self.inner.write();
        processor.load(source).map(|doc| doc.info().clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.read().is_loaded()
    }

    pub fn info(&self) -> Option<Info> {
        self.inner.read().document().map(|doc| doc.info().clone())
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        self.inner.read().validate()
    }

    pub fn extract_endpoints(&self) -> Result<Vec<Endpoint>, SpecError> {
        self.inner.read().extract_endpoints()
    }

    pub fn schemas(&self) -> Result<Map<String, Value>, SpecError> {
        self.inner.read().schemas()
    }

    /// Run `f` against the processor under the read lock.
    pub fn with_processor<R>(&self, f: impl FnOnce(&SpecProcessor) -> R) -> R {
        f(&self.inner.read())
    }
}
