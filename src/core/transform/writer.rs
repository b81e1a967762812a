//! Element tree → generic document.

use super::reader::clean_value;
use super::unwrap::{is_written_unwrapped, Placement};
use crate::core::catalog::CatalogLookup;
use crate::core::model::slots::list_is_wrapped;
use crate::core::model::{Element, Node};
use serde_json::{Map, Value};

pub struct Writer<'a> {
    catalog: &'a dyn CatalogLookup,
}

impl<'a> Writer<'a> {
    pub fn new(catalog: &'a dyn CatalogLookup) -> Self {
        Self { catalog }
    }

    /// `{kind: body}` wrapper for an element.
    pub fn write_step(&self, element: &Element) -> Value {
        let mut map = Map::new();
        map.insert(element.kind.name().to_string(), self.write_body(element));
        Value::Object(map)
    }

    /// Body of an element: `id` first, `steps` last, empty fields dropped.
    pub fn write_body(&self, element: &Element) -> Value {
        if element.fields.is_empty() {
            if let Some(raw) = &element.raw_body {
                return raw.clone();
            }
        }

        let mut map = Map::new();
        if let Some(id) = element.id() {
            map.insert("id".to_string(), Value::String(id.to_string()));
        }
        let mut steps = None;
        for (key, node) in &element.fields {
            if key == "id" {
                continue;
            }
            let value = match node {
                Node::Value(value) => clean_value(value),
                Node::Element(child) => Some(self.write_property(key, child)),
                Node::Elements(members) => self.write_list(element, key, members),
            };
            match value {
                Some(value) if key == "steps" => steps = Some(value),
                Some(value) => {
                    map.insert(key.clone(), value);
                }
                None => {}
            }
        }
        if let Some(steps) = steps {
            map.insert("steps".to_string(), steps);
        }
        Value::Object(map)
    }

    fn write_property(&self, field: &str, child: &Element) -> Value {
        if is_written_unwrapped(field, &child.kind, Placement::Property) {
            self.write_body(child)
        } else {
            self.write_step(child)
        }
    }

    fn write_list(&self, parent: &Element, field: &str, members: &[Element]) -> Option<Value> {
        if members.is_empty() {
            return None;
        }
        let placement = if list_is_wrapped(parent, field, self.catalog) {
            Placement::Sequence
        } else {
            Placement::Clause
        };
        let items = members
            .iter()
            .map(|member| {
                if is_written_unwrapped(field, &member.kind, placement) {
                    self.write_body(member)
                } else {
                    self.write_step(member)
                }
            })
            .collect();
        Some(Value::Array(items))
    }
}
