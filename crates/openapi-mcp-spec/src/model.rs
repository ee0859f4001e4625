use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SpecError;
use crate::parser::validate_document;

/// A loaded, structurally validated OpenAPI 3.0.x/3.1.x document.
///
/// The top-level fields that validation guarantees are exposed through
/// typed accessors; everything below `paths` and `components` stays as a
/// raw JSON tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecDocument {
    #[serde(skip)]
    info: Info,
    #[serde(flatten)]
    root: Map<String, Value>,
}

/// The `info` object, reduced to the fields this crate relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Info {
    /// The `info.title` field.
    pub title: String,
    /// The `info.version` field (the API version, not the OpenAPI version).
    pub version: String,
    /// The `info.description` field, if present.
    pub description: Option<String>,
}

impl SpecDocument {
    /// Validate a parsed tree and wrap it.
    pub fn from_value(value: Value) -> Result<Self, SpecError> {
        validate_document(&value)?;

        let Value::Object(root) = value else {
            // validate_document rejects every non-mapping root
            return Err(SpecError::Validation(
                "specification root must be a mapping".into(),
            ));
        };

        let info = root
            .get("info")
            .and_then(Value::as_object)
            .map(|info| Info {
                title: info.get("title").map(scalar_text).unwrap_or_default(),
                version: info.get("version").map(scalar_text).unwrap_or_default(),
                description: info
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            })
            .ok_or_else(|| {
                SpecError::Validation(
                    "invalid 'info' section: must contain 'title' and 'version'".into(),
                )
            })?;

        Ok(Self { info, root })
    }

    /// The `openapi` version string (e.g. "3.1.0").
    pub fn openapi_version(&self) -> &str {
        self.root
            .get("openapi")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn title(&self) -> &str {
        &self.info.title
    }

    /// `paths` entries in document order.
    pub fn paths(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
    }

    /// The `components.schemas` mapping, if the document declares one.
    pub fn schemas(&self) -> Option<&Map<String, Value>> {
        self.root
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_object)
    }

    /// The raw document tree.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Serialize the document back to JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.root)
    }
}

/// Render a scalar the way it would read in the source document.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One operation found under `paths`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    /// The path template (e.g. "/pets/{petId}").
    pub path: String,
    /// The HTTP method, upper-cased.
    pub method: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Raw parameter objects, in declaration order.
    pub parameters: Vec<Value>,
    /// Raw `requestBody` object, if declared.
    pub request_body: Option<Value>,
    /// Raw `responses` mapping keyed by status code.
    pub responses: Map<String, Value>,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        match self.summary.as_deref().or(self.operation_id.as_deref()) {
            Some(label) => write!(f, " - {}", label),
            None => Ok(()),
        }
    }
}
