//! The stateful spec processor: load, validate, extract.

use std::path::Path;

use openapi_mcp_telemetry::{log_spec_loaded, log_validation_failure};
use reqwest::Url;
use serde_json::{Map, Value};

use crate::error::SpecError;
use crate::extract;
use crate::fetch::{HttpFetcher, SpecFetcher};
use crate::model::{Endpoint, SpecDocument};
use crate::parser::{self, SpecFormat};

/// Loads one OpenAPI document at a time and answers questions about it.
///
/// The processor is either empty or holds a validated document. Every
/// failed load leaves it empty, including a failed reload of a processor
/// that previously held a document.
pub struct SpecProcessor {
    fetcher: Box<dyn SpecFetcher>,
    document: Option<SpecDocument>,
}

impl SpecProcessor {
    /// A processor that fetches URLs over HTTP.
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::new())
    }

    /// A processor that fetches URLs through `fetcher`.
    pub fn with_fetcher(fetcher: impl SpecFetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            document: None,
        }
    }

    /// Load from a URL when `source` starts with `http://` or `https://`,
    /// otherwise from the filesystem.
    pub fn load(&mut self, source: &str) -> Result<&SpecDocument, SpecError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            self.load_from_url(source)
        } else {
            self.load_from_file(source)
        }
    }

    /// Load a `.json`, `.yaml`, or `.yml` file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<&SpecDocument, SpecError> {
        self.document = None;
        let path = path.as_ref();

        if !path.exists() {
            return Err(SpecError::NotFound(path.to_path_buf()));
        }

        let format = SpecFormat::from_path(path).ok_or_else(|| {
            let ext = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            SpecError::Format(format!("unsupported file format: '{}'", ext))
        })?;

        if !path.is_file() {
            return Err(SpecError::Format(format!(
                "not a regular file: {}",
                path.display()
            )));
        }

        let content = String::from_utf8(std::fs::read(path)?).map_err(|e| {
            SpecError::Format(format!("invalid {} format: {}", format.name(), e))
        })?;
        let value = parser::parse_as(format, &content)?;
        self.store(value, &path.display().to_string())
    }

    /// Download and load a spec. One GET, no retry.
    pub fn load_from_url(&mut self, url: &str) -> Result<&SpecDocument, SpecError> {
        self.document = None;

        let parsed = Url::parse(url)
            .map_err(|e| SpecError::Format(format!("invalid URL: {} ({})", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SpecError::Format(format!(
                "unsupported URL scheme '{}': {}",
                parsed.scheme(),
                url
            )));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(SpecError::Format(format!("invalid URL: {}", url)));
        }

        let fetched = self.fetcher.fetch(&parsed)?;

        let value = match fetched
            .content_type
            .as_deref()
            .and_then(SpecFormat::from_content_type)
        {
            Some(format) => parser::parse_as(format, &fetched.body)?,
            None => parser::parse_inferred(&fetched.body)?,
        };
        self.store(value, url)
    }

    fn store(&mut self, value: Value, source: &str) -> Result<&SpecDocument, SpecError> {
        let doc = SpecDocument::from_value(value).inspect_err(|e| {
            log_validation_failure!(source, error = %e, "spec rejected");
        })?;

        log_spec_loaded!(
            source,
            title = doc.title(),
            openapi = doc.openapi_version(),
            "loaded OpenAPI spec"
        );

        Ok(self.document.insert(doc))
    }

    /// Re-check the current document. `Ok(())` means valid; there is no
    /// "invalid but not an error" outcome.
    pub fn validate(&self) -> Result<(), SpecError> {
        let doc = self.document.as_ref().ok_or_else(SpecError::not_loaded)?;
        parser::validate_document(&Value::Object(doc.root().clone()))
    }

    /// The current document, if one is loaded.
    pub fn document(&self) -> Option<&SpecDocument> {
        self.document.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Endpoint descriptors in document order.
    pub fn extract_endpoints(&self) -> Result<Vec<Endpoint>, SpecError> {
        extract::extract_endpoints(self.loaded()?)
    }

    /// `components.schemas`, or an empty mapping.
    pub fn schemas(&self) -> Result<Map<String, Value>, SpecError> {
        Ok(extract::extract_schemas(self.loaded()?))
    }

    fn loaded(&self) -> Result<&SpecDocument, SpecError> {
        self.document.as_ref().ok_or_else(SpecError::not_loaded)
    }
}

impl Default for SpecProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SpecProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecProcessor")
            .field("document", &self.document.as_ref().map(SpecDocument::title))
            .finish_non_exhaustive()
    }
}
