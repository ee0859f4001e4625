//! Human- and machine-readable summaries of a loaded spec.

use openapi_mcp_spec::{Endpoint, ErrorKind, SpecError, SpecProcessor};
use serde::Serialize;

/// What the CLI shows about a successfully loaded spec.
#[derive(Debug, Clone, Serialize)]
pub struct SpecSummary {
    pub source: String,
    pub title: String,
    pub version: String,
    pub openapi: String,
    pub endpoints: Vec<Endpoint>,
    pub schemas: Vec<String>,
}

impl SpecSummary {
    /// Load `source` into `processor` and summarize the result.
    pub fn load(processor: &mut SpecProcessor, source: &str) -> Result<Self, SpecError> {
        processor.load(source)?;
        Self::from_processor(processor, source)
    }

    /// Summarize the document `processor` currently holds.
    pub fn from_processor(processor: &SpecProcessor, source: &str) -> Result<Self, SpecError> {
        let doc = processor
            .document()
            .ok_or_else(|| SpecError::Validation("no specification loaded".into()))?;

        Ok(Self {
            source: source.to_string(),
            title: doc.info().title.clone(),
            version: doc.info().version.clone(),
            openapi: doc.openapi_version().to_string(),
            endpoints: processor.extract_endpoints()?,
            schemas: processor.schemas()?.keys().cloned().collect(),
        })
    }

    /// Text shown by `validate`.
    pub fn render_validation(&self) -> String {
        format!(
            "Valid OpenAPI specification\n  title:     {}\n  version:   {}\n  openapi:   {}\n  endpoints: {}\n",
            self.title,
            self.version,
            self.openapi,
            self.endpoints.len()
        )
    }

    /// Text shown by `inspect`.
    pub fn render_inspection(&self, with_schemas: bool) -> String {
        let mut out = format!(
            "{} ({})\n{} endpoint(s):\n",
            self.title,
            self.version,
            self.endpoints.len()
        );
        out.extend(self.endpoints.iter().map(|e| format!("  {}\n", e)));

        if with_schemas {
            out.push_str(&format!("{} schema(s):\n", self.schemas.len()));
            out.extend(self.schemas.iter().map(|name| format!("  {}\n", name)));
        }
        out
    }

    /// JSON object printed by `validate --format json`.
    pub fn to_validation_json(&self) -> serde_json::Value {
        serde_json::json!({
            "source": self.source,
            "valid": true,
            "title": self.title,
            "version": self.version,
            "openapi": self.openapi,
            "endpoints": self.endpoints.len(),
        })
    }
}

/// JSON object printed by `validate --format json` on failure.
pub fn failure_json(source: &str, error: &SpecError) -> serde_json::Value {
    serde_json::json!({
        "source": source,
        "valid": false,
        "kind": kind_name(error.kind()),
        "error": error.to_string(),
    })
}

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotFound => "not_found",
        ErrorKind::Format => "format",
        ErrorKind::Validation => "validation",
        ErrorKind::Transport => "transport",
        ErrorKind::Io => "io",
    }
}
