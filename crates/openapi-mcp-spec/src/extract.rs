//! Endpoint and schema extraction from a loaded document.

use serde_json::{Map, Value};

use crate::error::SpecError;
use crate::model::{Endpoint, SpecDocument};

/// Path-item keys that describe the path item itself rather than an operation.
const PATH_ITEM_FIELDS: &[&str] = &["parameters", "servers", "summary", "description"];

/// Build one [`Endpoint`] per (path, method) pair, in document order.
pub fn extract_endpoints(doc: &SpecDocument) -> Result<Vec<Endpoint>, SpecError> {
    let mut endpoints = Vec::new();

    for (path, path_item) in doc.paths() {
        let path_obj = path_item.as_object().ok_or_else(|| {
            SpecError::Validation(format!("path item for '{}' must be an object", path))
        })?;

        for (method, operation) in path_obj {
            if PATH_ITEM_FIELDS.contains(&method.as_str()) {
                continue;
            }

            let method = method.to_uppercase();
            let op_obj = operation.as_object().ok_or_else(|| {
                SpecError::Validation(format!("operation {} {} must be an object", method, path))
            })?;

            endpoints.push(Endpoint {
                path: path.clone(),
                method,
                operation_id: string_field(op_obj, "operationId"),
                summary: string_field(op_obj, "summary"),
                description: string_field(op_obj, "description"),
                parameters: op_obj
                    .get("parameters")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
                request_body: op_obj.get("requestBody").filter(|v| !v.is_null()).cloned(),
                responses: op_obj
                    .get("responses")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
            });
        }
    }

    Ok(endpoints)
}

/// The `components.schemas` mapping, or an empty mapping when absent.
pub fn extract_schemas(doc: &SpecDocument) -> Map<String, Value> {
    doc.schemas().cloned().unwrap_or_default()
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}
