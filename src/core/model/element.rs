use super::kinds::StepKind;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Tag of an element: a statically known kind, or a key the table does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Step(StepKind),
    Untyped(String),
}

impl ElementKind {
    pub fn from_name(name: &str) -> Self {
        match StepKind::from_name(name) {
            Some(kind) => ElementKind::Step(kind),
            None => ElementKind::Untyped(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ElementKind::Step(kind) => kind.name(),
            ElementKind::Untyped(name) => name,
        }
    }

    pub fn step(&self) -> Option<StepKind> {
        match self {
            ElementKind::Step(kind) => Some(*kind),
            ElementKind::Untyped(_) => None,
        }
    }

    pub fn is(&self, kind: StepKind) -> bool {
        self.step() == Some(kind)
    }
}

impl From<StepKind> for ElementKind {
    fn from(kind: StepKind) -> Self {
        ElementKind::Step(kind)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value stored under one field of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Generic document data kept verbatim.
    Value(Value),
    /// A single nested element (single slot, expression, selector member).
    Element(Box<Element>),
    /// A list of nested elements (branch or clause list).
    Elements(Vec<Element>),
}

impl Node {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_elements(&self) -> Option<&[Element]> {
        match self {
            Node::Elements(elements) => Some(elements),
            _ => None,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Value(value)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(Box::new(element))
    }
}

impl From<Vec<Element>> for Node {
    fn from(elements: Vec<Element>) -> Self {
        Node::Elements(elements)
    }
}

/// One tagged node of a workflow document.
///
/// `instance_id` and `show_children` are editor bookkeeping: they never reach the
/// serialized document and are ignored by equality.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub instance_id: Uuid,
    pub show_children: bool,
    pub fields: IndexMap<String, Node>,
    /// Body of an untyped step that was not an object (`- custom: value`).
    pub raw_body: Option<Value>,
}

impl Element {
    pub fn new(kind: impl Into<ElementKind>) -> Self {
        Self {
            kind: kind.into(),
            instance_id: Uuid::new_v4(),
            show_children: true,
            fields: IndexMap::new(),
            raw_body: None,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.fields.insert(name.into(), node.into());
        self
    }

    pub fn step_kind(&self) -> Option<StepKind> {
        self.kind.step()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.fields.get_mut(name)
    }

    pub fn set(&mut self, name: impl Into<String>, node: impl Into<Node>) {
        self.fields.insert(name.into(), node.into());
    }

    /// Removes a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.fields.shift_remove(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_value()?.as_str()
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id").filter(|id| !id.is_empty())
    }

    pub fn set_id(&mut self, id: &str) {
        self.set("id", Value::String(id.to_string()));
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
            .filter(|text| !text.trim().is_empty())
    }

    pub fn uri(&self) -> Option<&str> {
        self.str_field("uri")
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.get(name)?.as_element()
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        match self.get_mut(name)? {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn elements(&self, name: &str) -> &[Element] {
        self.get(name)
            .and_then(Node::as_elements)
            .unwrap_or_default()
    }

    /// Mutable access to a list of elements, creating an empty list when absent.
    pub fn elements_mut(&mut self, name: &str) -> Option<&mut Vec<Element>> {
        if !self.fields.contains_key(name) {
            self.fields
                .insert(name.to_string(), Node::Elements(Vec::new()));
        }
        match self.fields.get_mut(name)? {
            Node::Elements(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn steps(&self) -> &[Element] {
        self.elements("steps")
    }

    /// Component scheme for endpoint-bearing steps (`timer` for `timer:tick`).
    pub fn component_name(&self) -> Option<String> {
        let kind = self.step_kind()?;
        if kind == StepKind::Kamelet {
            return self.str_field("name").map(|name| format!("kamelet:{}", name));
        }
        if !kind.carries_endpoint() {
            return None;
        }
        let uri = self.uri()?.trim();
        if uri.is_empty() {
            return None;
        }
        let scheme = uri.split(':').next().unwrap_or(uri);
        if scheme == "kamelet" {
            let name = uri
                .trim_start_matches("kamelet:")
                .split(['?', '/'])
                .next()
                .unwrap_or_default();
            return Some(format!("kamelet:{}", name));
        }
        Some(scheme.to_string())
    }

    /// Copies the fields of `other` onto this element, keeping identity and steps.
    pub fn merge_in_place(&mut self, other: Element) {
        for (key, node) in other.fields {
            if key == "steps" || key == "id" {
                continue;
            }
            self.fields.insert(key, node);
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.fields == other.fields && self.raw_body == other.raw_body
    }
}
