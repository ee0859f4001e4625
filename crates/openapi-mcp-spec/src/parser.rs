//! Format detection, parsing, and structural validation.

use std::path::Path;

use serde_json::Value;

use crate::error::SpecError;

/// Top-level fields every document must carry, checked in this order.
const REQUIRED_FIELDS: &[&str] = &["openapi", "info", "paths"];

/// OpenAPI version prefixes we accept.
const SUPPORTED_VERSIONS: &[&str] = &["3.0", "3.1"];

/// Content types that unambiguously declare YAML.
const YAML_CONTENT_TYPES: &[&str] = &["application/yaml", "application/x-yaml", "text/yaml"];

/// Serialization format of a spec source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// Pick the format from a file extension. `None` for anything other
    /// than `.json`, `.yaml`, or `.yml`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Pick the format from a `Content-Type` header value. `None` when the
    /// header does not clearly name JSON or YAML.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("application/json") {
            Some(Self::Json)
        } else if YAML_CONTENT_TYPES
            .iter()
            .any(|yaml| content_type.contains(yaml))
        {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Parse `input` with the given format.
pub fn parse_as(format: SpecFormat, input: &str) -> Result<Value, SpecError> {
    let parsed = match format {
        SpecFormat::Json => serde_json::from_str(input).map_err(|e| e.to_string()),
        SpecFormat::Yaml => parse_yaml(input),
    };
    parsed.map_err(|e| SpecError::Format(format!("invalid {} format: {}", format.name(), e)))
}

/// Parse `input` without a declared format: JSON first, then YAML.
///
/// Any text is a valid YAML scalar, so the YAML attempt only counts when it
/// produces a mapping. If both attempts fail, both messages are reported.
pub fn parse_inferred(input: &str) -> Result<Value, SpecError> {
    let json_err = match serde_json::from_str::<Value>(input) {
        Ok(value) => {
            tracing::debug!(format = "json", "inferred spec format");
            return Ok(value);
        }
        Err(e) => e,
    };

    match parse_yaml(input) {
        Ok(value @ Value::Object(_)) => {
            tracing::debug!(format = "yaml", "inferred spec format");
            Ok(value)
        }
        Ok(_) => Err(SpecError::Format(format!(
            "could not parse response as JSON or YAML (JSON: {}; YAML: document is not a mapping)",
            json_err
        ))),
        Err(yaml_err) => Err(SpecError::Format(format!(
            "could not parse response as JSON or YAML (JSON: {}; YAML: {})",
            json_err, yaml_err
        ))),
    }
}

/// YAML goes through `serde_yaml::Value` so that non-string mapping keys
/// (`200:` under `responses`) become JSON object keys.
/// Merge keys (`<<: *anchor`) are expanded before conversion.
fn parse_yaml(input: &str) -> Result<Value, String> {
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(input).map_err(|e| e.to_string())?;
    yaml.apply_merge().map_err(|e| e.to_string())?;
    serde_json::to_value(yaml).map_err(|e| e.to_string())
}

/// Structural validation of a parsed document.
///
/// Short-circuits on the first failure. There is no `false` outcome: an
/// invalid document is always reported as [`SpecError::Validation`].
pub fn validate_document(root: &Value) -> Result<(), SpecError> {
    let root = match root {
        Value::Null => return Err(SpecError::not_loaded()),
        Value::Object(map) if map.is_empty() => return Err(SpecError::not_loaded()),
        Value::Object(map) => map,
        _ => {
            return Err(SpecError::Validation(
                "specification root must be a mapping".into(),
            ))
        }
    };

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !root.contains_key(**f)) {
        return Err(SpecError::Validation(format!(
            "invalid OpenAPI specification: missing required field '{}'",
            missing
        )));
    }

    let version = root.get("openapi").and_then(Value::as_str);
    if !version.is_some_and(|v| SUPPORTED_VERSIONS.iter().any(|p| v.starts_with(p))) {
        let shown = match root.get("openapi") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        return Err(SpecError::Validation(format!(
            "unsupported OpenAPI version: {}. Expected 3.0.x or 3.1.x",
            shown
        )));
    }

    let info_ok = root
        .get("info")
        .and_then(Value::as_object)
        .is_some_and(|info| info.contains_key("title") && info.contains_key("version"));
    if !info_ok {
        return Err(SpecError::Validation(
            "invalid 'info' section: must contain 'title' and 'version'".into(),
        ));
    }

    if !root.get("paths").is_some_and(Value::is_object) {
        return Err(SpecError::Validation(
            "invalid 'paths' section: must be an object".into(),
        ));
    }

    Ok(())
}
