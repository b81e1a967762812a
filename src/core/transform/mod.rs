//! Text ⇄ document model.
//!
//! Reading goes YAML text → generic value → element trees; writing runs the
//! same path backwards. Only text that is not YAML at all is an error; a
//! document whose outer layout is not understood is reported as unsupported.

pub mod reader;
pub mod unwrap;
pub mod writer;

pub use reader::{clean_value, ReadError, Reader};
pub use writer::Writer;

use crate::core::catalog::CatalogLookup;
use crate::core::document::{CamelDocument, DocumentShape};
use crate::core::entities::{Entity, NonVisualEntity};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("document is not valid YAML: {0}")]
    Syntax(#[source] serde_yaml::Error),
    #[error("failed to emit YAML: {0}")]
    Emit(#[source] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Supported(CamelDocument),
    Unsupported(String),
}

/// Parses YAML text into a document.
pub fn parse_document(text: &str, catalog: &dyn CatalogLookup) -> Result<ParseOutcome, TransformError> {
    if text.trim().is_empty() {
        return Ok(ParseOutcome::Supported(CamelDocument::default()));
    }
    let value: Value = serde_yaml::from_str(text).map_err(TransformError::Syntax)?;
    Ok(parse_value(&value, catalog))
}

/// Classifies a generic document and reads every flow it holds.
pub fn parse_value(value: &Value, catalog: &dyn CatalogLookup) -> ParseOutcome {
    let reader = Reader::new(catalog);
    match value {
        Value::Null => ParseOutcome::Supported(CamelDocument::default()),
        Value::Array(items) => ParseOutcome::Supported(CamelDocument {
            shape: DocumentShape::Plain,
            entities: read_items(&reader, items),
        }),
        Value::Object(map) => match map.get("kind").and_then(Value::as_str) {
            Some("Integration") => {
                let mut header = map.clone();
                let flows = header
                    .get_mut("spec")
                    .and_then(Value::as_object_mut)
                    .and_then(|spec| spec.remove("flows"));
                let entities = match flows {
                    Some(Value::Array(items)) => read_items(&reader, &items),
                    _ => Vec::new(),
                };
                ParseOutcome::Supported(CamelDocument {
                    shape: DocumentShape::Integration { header },
                    entities,
                })
            }
            Some(kind) => ParseOutcome::Unsupported(format!("'{}' resources are not supported", kind)),
            None if map.len() == 1 && map.contains_key("from") => ParseOutcome::Supported(CamelDocument {
                shape: DocumentShape::Plain,
                entities: read_items(&reader, std::slice::from_ref(value)),
            }),
            None => ParseOutcome::Unsupported("expected a list of flows or an Integration".to_string()),
        },
        other => ParseOutcome::Unsupported(format!("expected a list of flows, found {}", type_name(other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn read_items(reader: &Reader<'_>, items: &[Value]) -> Vec<Entity> {
    items.iter().map(|item| read_item(reader, item)).collect()
}

fn read_item(reader: &Reader<'_>, item: &Value) -> Entity {
    let single = item.as_object().filter(|map| map.len() == 1);
    let Some((key, body)) = single.and_then(|map| map.iter().next()) else {
        warn!("Keeping unrecognized top-level item verbatim");
        return Entity::NonVisual(NonVisualEntity::new(item.clone()));
    };

    let read = if key == "from" {
        reader.read_named("route", &json!({ "from": body }))
    } else if Entity::is_visual_kind(key) {
        reader.read_named(key, body)
    } else {
        debug!(kind = %key, "Keeping non-visual entity");
        return Entity::NonVisual(NonVisualEntity::new(item.clone()));
    };

    match read.map(Entity::from_root) {
        Ok(Some(entity)) => entity,
        Ok(None) => Entity::NonVisual(NonVisualEntity::new(item.clone())),
        Err(err) => {
            warn!(kind = %key, error = %err, "Failed to read flow, keeping it verbatim");
            Entity::NonVisual(NonVisualEntity::new(item.clone()))
        }
    }
}

/// Generic form of the document, ready to be emitted.
pub fn document_to_value(document: &CamelDocument, catalog: &dyn CatalogLookup) -> Value {
    let writer = Writer::new(catalog);
    let flows: Vec<Value> = document
        .entities
        .iter()
        .map(|entity| match entity {
            Entity::NonVisual(raw) => raw.raw().clone(),
            visual => match visual.as_visual() {
                Some(visual) => writer.write_step(visual.root()),
                None => Value::Null,
            },
        })
        .collect();

    match &document.shape {
        DocumentShape::Plain => Value::Array(flows),
        DocumentShape::Integration { header } => {
            let mut header = header.clone();
            let spec = header
                .entry("spec")
                .or_insert_with(|| Value::Object(Map::new()));
            if !spec.is_object() {
                *spec = Value::Object(Map::new());
            }
            if let Value::Object(spec) = spec {
                spec.insert("flows".to_string(), Value::Array(flows));
            }
            Value::Object(header)
        }
    }
}

pub fn serialize_document(document: &CamelDocument, catalog: &dyn CatalogLookup) -> Result<String, TransformError> {
    serde_yaml::to_string(&document_to_value(document, catalog)).map_err(TransformError::Emit)
}
