//! Generic document → element tree.

use super::unwrap::{is_written_unwrapped, Placement};
use crate::core::catalog::CatalogLookup;
use crate::core::model::slots::hint_slots;
use crate::core::model::{
    ChildSpec, Element, ElementKind, Node, Shorthand, SlotShape, StepKind, StepSlot,
};
use serde_json::{Map, Value};
use std::borrow::Cow;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error("expected a single-key step wrapper, found {0}")]
    NotAStep(String),
    #[error("'{kind}' does not accept a scalar body")]
    ScalarBody { kind: String },
    #[error("'{kind}' body must be an object, found {found}")]
    NotAnObject { kind: String, found: String },
    #[error("field '{field}' of '{kind}' must be a list")]
    NotAList { kind: String, field: String },
    #[error("unknown data format '{0}'")]
    UnknownDataFormat(String),
}

/// Drops null, blank strings, empty objects and empty arrays, recursively.
pub fn clean_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.iter().filter_map(clean_value).collect();
            (!cleaned.is_empty()).then_some(Value::Array(cleaned))
        }
        Value::Object(map) => {
            let cleaned: Map<String, Value> = map
                .iter()
                .filter_map(|(key, value)| clean_value(value).map(|value| (key.clone(), value)))
                .collect();
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        other => Some(other.clone()),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "a list".to_string(),
        Value::Object(map) => format!("an object with {} keys", map.len()),
    }
}

/// Reads step fragments into elements, expanding shorthand and resolving slots.
pub struct Reader<'a> {
    catalog: &'a dyn CatalogLookup,
}

impl<'a> Reader<'a> {
    pub fn new(catalog: &'a dyn CatalogLookup) -> Self {
        Self { catalog }
    }

    /// Reads a `{kind: body}` wrapper.
    pub fn read_step(&self, value: &Value) -> Result<Element, ReadError> {
        match value {
            Value::Object(map) if map.len() == 1 => {
                let (name, body) = map.iter().next().ok_or_else(|| {
                    ReadError::NotAStep(describe(value))
                })?;
                self.read_named(name, body)
            }
            other => Err(ReadError::NotAStep(describe(other))),
        }
    }

    /// Reads the body of a step whose kind is given by name.
    pub fn read_named(&self, name: &str, body: &Value) -> Result<Element, ReadError> {
        match StepKind::from_name(name) {
            Some(kind) => self.read_typed(kind, body),
            None => Ok(self.read_untyped(name, body)),
        }
    }

    pub fn read_typed(&self, kind: StepKind, body: &Value) -> Result<Element, ReadError> {
        let body = expand_shorthand(kind, body)?;
        let empty = Map::new();
        let map = match body.as_ref() {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(ReadError::NotAnObject {
                    kind: kind.name().to_string(),
                    found: describe(other),
                })
            }
        };

        let mut element = Element::new(kind);
        for (key, value) in map {
            self.read_field(&mut element, key, value, false);
        }
        Ok(element)
    }

    /// Reads `value` as field `field` of `element`, replacing what was there.
    pub fn assign_field(&self, element: &mut Element, field: &str, value: &Value) {
        self.read_field(element, field, value, true);
    }

    fn read_field(&self, element: &mut Element, key: &str, value: &Value, replace: bool) {
        let Some(kind) = element.step_kind() else {
            self.read_untyped_field(element, key, value);
            return;
        };

        if let Some(spec) = kind.child(key) {
            match self.read_child(kind, spec, value) {
                Ok(Some(node)) => element.set(key, node),
                Ok(None) => {
                    element.remove(key);
                }
                Err(err) => {
                    warn!(kind = %kind, field = key, error = %err, "Keeping malformed field as raw data");
                    keep_raw(element, key, value);
                }
            }
            return;
        }

        if let Some(member) = StepKind::from_name(key) {
            if kind.selector() == Some(member.family()) {
                self.read_selection(element, member, value, replace);
                return;
            }
            if member.is_language() && kind.folds_inline_language() {
                if element.get("expression").is_some() && !replace {
                    warn!(kind = %kind, language = key, "Expression already set, keeping inline language as raw data");
                    keep_raw(element, key, value);
                    return;
                }
                match self.read_typed(member, value) {
                    Ok(language) => {
                        debug!(kind = %kind, language = key, "Folding inline language into expression");
                        element.set(
                            "expression",
                            Element::new(StepKind::Expression).with_field(key, language),
                        );
                    }
                    Err(err) => {
                        warn!(kind = %kind, field = key, error = %err, "Keeping malformed language as raw data");
                        keep_raw(element, key, value);
                    }
                }
                return;
            }
        }

        keep_raw(element, key, value);
    }

    /// One-of selection: at most one member of the selector family is active.
    fn read_selection(&self, element: &mut Element, member: StepKind, value: &Value, replace: bool) {
        let family = member.family();
        let existing: Vec<String> = element
            .fields
            .iter()
            .filter(|(name, node)| {
                matches!(node, Node::Element(_))
                    && StepKind::from_name(name).is_some_and(|k| k.family() == family)
            })
            .map(|(name, _)| name.clone())
            .collect();

        if !existing.is_empty() {
            if !replace {
                warn!(
                    kind = %element.kind,
                    kept = %existing[0],
                    ignored = member.name(),
                    "Only one option may be set, ignoring the extra one"
                );
                return;
            }
            for name in existing {
                element.remove(&name);
            }
        }

        match self.read_typed(member, value) {
            Ok(selected) => element.set(member.name(), selected),
            Err(err) => {
                warn!(kind = %element.kind, field = member.name(), error = %err, "Keeping malformed option as raw data");
                keep_raw(element, member.name(), value);
            }
        }
    }

    fn read_child(
        &self,
        parent: StepKind,
        spec: &ChildSpec,
        value: &Value,
    ) -> Result<Option<Node>, ReadError> {
        match *spec {
            ChildSpec::Single { .. } if value.is_null() => Ok(None),
            ChildSpec::Single { kind, .. } => Ok(Some(self.read_typed(kind, value)?.into())),
            ChildSpec::Expression { .. } => {
                Ok(Some(self.read_typed(StepKind::Expression, value)?.into()))
            }
            ChildSpec::Branch { field } | ChildSpec::WrappedList { field } => {
                self.read_list(parent.name(), field, value, |item| self.read_step(item))
            }
            ChildSpec::List { field, kind } => {
                self.read_list(parent.name(), field, value, |item| self.read_typed(kind, item))
            }
            ChildSpec::OneOf { .. } => Ok(None),
        }
    }

    /// Reads a list of members; malformed members are logged and skipped.
    fn read_list<F>(
        &self,
        parent: &str,
        field: &str,
        value: &Value,
        read_item: F,
    ) -> Result<Option<Node>, ReadError>
    where
        F: Fn(&Value) -> Result<Element, ReadError>,
    {
        let items = match value {
            Value::Null => return Ok(None),
            Value::Array(items) => items,
            _ => {
                return Err(ReadError::NotAList {
                    kind: parent.to_string(),
                    field: field.to_string(),
                })
            }
        };

        let mut members = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match read_item(item) {
                Ok(member) => members.push(member),
                Err(err) => {
                    warn!(kind = parent, field, index, error = %err, "Skipping malformed step");
                }
            }
        }
        Ok((!members.is_empty()).then_some(Node::Elements(members)))
    }

    fn read_untyped(&self, name: &str, body: &Value) -> Element {
        warn!(kind = name, "Unknown step kind, keeping it as an untyped element");
        let mut element = Element::new(ElementKind::Untyped(name.to_string()));
        match body {
            Value::Object(map) => {
                for (key, value) in map {
                    self.read_untyped_field(&mut element, key, value);
                }
            }
            Value::Null => {}
            other => element.raw_body = Some(other.clone()),
        }
        element
    }

    fn read_untyped_field(&self, element: &mut Element, key: &str, value: &Value) {
        let name = element.kind.name().to_string();
        let mut slots = hint_slots(&name, self.catalog);
        if slots.is_empty() && key == "steps" && value.is_array() {
            slots.push(StepSlot {
                name: Cow::Borrowed("steps"),
                shape: SlotShape::Branch,
                wrapped: true,
                member: None,
            });
        }

        let Some(slot) = slots.iter().find(|slot| slot.name == key) else {
            keep_raw(element, key, value);
            return;
        };

        let result = match slot.shape {
            SlotShape::Branch => self.read_list(&name, key, value, |item| self.read_step(item)),
            SlotShape::ArrayClause if slot.wrapped => {
                self.read_list(&name, key, value, |item| self.read_step(item))
            }
            SlotShape::ArrayClause => {
                let member = slot.member.as_deref().unwrap_or(key);
                self.read_list(&name, key, value, |item| self.read_named(member, item))
            }
            SlotShape::SingleClause => {
                let member = slot.member.as_deref().unwrap_or(key);
                let read = if is_written_unwrapped(key, &ElementKind::from_name(member), Placement::Property) {
                    self.read_named(member, value)
                } else {
                    self.read_step(value)
                };
                read.map(|element| Some(element.into()))
            }
        };

        match result {
            Ok(Some(node)) => element.set(key, node),
            Ok(None) => {
                element.remove(key);
            }
            Err(err) => {
                warn!(kind = %name, field = key, error = %err, "Keeping malformed slot as raw data");
                keep_raw(element, key, value);
            }
        }
    }
}

fn keep_raw(element: &mut Element, key: &str, value: &Value) {
    match clean_value(value) {
        Some(cleaned) => element.set(key, Node::Value(cleaned)),
        None => {
            element.remove(key);
        }
    }
}

/// Expands a scalar body into object form according to the kind's shorthand rule.
fn expand_shorthand(kind: StepKind, body: &Value) -> Result<Cow<'_, Value>, ReadError> {
    if !matches!(body, Value::String(_) | Value::Number(_) | Value::Bool(_)) {
        return Ok(Cow::Borrowed(body));
    }
    match kind.shorthand() {
        Shorthand::Field(field) => {
            let mut map = Map::new();
            map.insert(field.to_string(), body.clone());
            Ok(Cow::Owned(Value::Object(map)))
        }
        Shorthand::DataFormatName => {
            let name = body.as_str().unwrap_or_default();
            match StepKind::from_name(name) {
                Some(format) if format.family() == crate::core::model::Family::DataFormat => {
                    let mut map = Map::new();
                    map.insert(name.to_string(), Value::Object(Map::new()));
                    Ok(Cow::Owned(Value::Object(map)))
                }
                _ => Err(ReadError::UnknownDataFormat(name.to_string())),
            }
        }
        Shorthand::None => Err(ReadError::ScalarBody {
            kind: kind.name().to_string(),
        }),
    }
}
