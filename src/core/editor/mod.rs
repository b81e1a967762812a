//! Path-addressed structural edits on an element tree.
//!
//! Every operation tolerates paths that point at missing containers: reads
//! return `None` and mutations leave the tree untouched. Callers serialize
//! edits; any edit invalidates earlier graph projections.

pub mod navigate;

pub use navigate::{resolve, resolve_mut, NodeMut, NodeRef};

use crate::core::catalog::CatalogLookup;
use crate::core::model::{element_slots, Element, Node, Path, Resolution, SlotShape, StepKind};
use crate::core::transform::reader::Reader;
use crate::core::transform::writer::Writer;
use navigate::{list_owner_mut, resolve_element_mut};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertMode {
    /// Before the addressed member.
    Prepend,
    /// After the addressed member.
    Append,
    /// In place of the addressed member.
    Replace,
    /// First member of the addressed node's `steps`.
    Child,
    /// Into the addressed node's non-`steps` slot matching the new element's kind.
    SpecialChild,
}

pub struct StructuralEditor<'a> {
    catalog: &'a dyn CatalogLookup,
    reader: Reader<'a>,
    writer: Writer<'a>,
}

impl<'a> StructuralEditor<'a> {
    pub fn new(catalog: &'a dyn CatalogLookup) -> Self {
        Self {
            catalog,
            reader: Reader::new(catalog),
            writer: Writer::new(catalog),
        }
    }

    pub fn read<'e>(&self, root: &'e Element, path: &Path) -> Option<NodeRef<'e>> {
        resolve(root, path)
    }

    /// Generic document form of whatever `path` addresses.
    pub fn read_value(&self, root: &Element, path: &Path) -> Option<Value> {
        Some(match resolve(root, path)? {
            NodeRef::Value(value) => value.clone(),
            NodeRef::Element(element) => self.writer.write_body(element),
            NodeRef::Elements(elements) => Value::Array(
                elements
                    .iter()
                    .map(|member| self.writer.write_step(member))
                    .collect(),
            ),
        })
    }

    /// Sets the generic `value` at `path`, reading it into elements where the
    /// target field is a slot or property element.
    pub fn write(&self, root: &mut Element, path: &Path, value: &Value) -> bool {
        let Some(resolution) = path.resolve() else {
            return false;
        };
        match resolution {
            Resolution::ArrayItem { array, index } => match resolve_mut(root, &array) {
                Some(NodeMut::Elements(members)) => {
                    let Some(member) = members.get_mut(index) else {
                        return false;
                    };
                    self.replace_member(member, value)
                }
                Some(NodeMut::Value(Value::Array(items))) if index < items.len() => {
                    items[index] = value.clone();
                    true
                }
                _ => false,
            },
            Resolution::IndexedMember {
                array,
                index,
                field,
            } => match resolve_mut(root, &array) {
                Some(NodeMut::Elements(members)) => {
                    let Some(member) = members.get_mut(index) else {
                        return false;
                    };
                    if member.kind.name() == field && member.get(&field).is_none() {
                        self.replace_member(member, value)
                    } else {
                        self.reader.assign_field(member, &field, value);
                        true
                    }
                }
                Some(NodeMut::Value(Value::Array(items))) => {
                    match items.get_mut(index).and_then(Value::as_object_mut) {
                        Some(object) => {
                            object.insert(field, value.clone());
                            true
                        }
                        None => false,
                    }
                }
                _ => false,
            },
            Resolution::ObjectField { object, field } => match resolve_mut(root, &object) {
                Some(NodeMut::Element(element)) => {
                    self.reader.assign_field(element, &field, value);
                    true
                }
                Some(NodeMut::Value(Value::Object(map))) => {
                    map.insert(field, value.clone());
                    true
                }
                _ => false,
            },
        }
    }

    fn replace_member(&self, member: &mut Element, value: &Value) -> bool {
        match self.reader.read_named(member.kind.name(), value) {
            Ok(mut replacement) => {
                replacement.instance_id = member.instance_id;
                *member = replacement;
                true
            }
            Err(err) => {
                debug!(error = %err, "Ignoring write of malformed step body");
                false
            }
        }
    }

    /// Inserts `element` relative to `path`. Returns whether the tree changed.
    pub fn insert(&self, root: &mut Element, path: &Path, element: Element, mode: InsertMode) -> bool {
        match mode {
            InsertMode::Child => self.insert_child(root, path, element),
            InsertMode::SpecialChild => self.insert_special_child(root, path, element),
            InsertMode::Prepend | InsertMode::Append | InsertMode::Replace => {
                self.insert_relative(root, path, element, mode)
            }
        }
    }

    fn insert_child(&self, root: &mut Element, path: &Path, element: Element) -> bool {
        let Some(target) = resolve_element_mut(root, path) else {
            return false;
        };
        let has_steps = element_slots(target, self.catalog)
            .iter()
            .any(|slot| slot.name == "steps" && slot.shape == SlotShape::Branch);
        if !has_steps {
            debug!(path = %path, kind = %target.kind, "Target has no steps branch");
            return false;
        }
        match target.elements_mut("steps") {
            Some(steps) => {
                steps.insert(0, element);
                true
            }
            None => false,
        }
    }

    fn insert_special_child(&self, root: &mut Element, path: &Path, element: Element) -> bool {
        let Some(target) = resolve_element_mut(root, path) else {
            return false;
        };
        let kind = element.kind.name().to_string();
        let slot = element_slots(target, self.catalog).into_iter().find(|slot| {
            slot.shape != SlotShape::Branch
                && (slot.member.as_deref() == Some(kind.as_str())
                    || (slot.wrapped && slot.name == kind.as_str()))
        });
        let Some(slot) = slot else {
            debug!(path = %path, kind = %kind, "No special slot accepts this kind");
            return false;
        };
        match slot.shape {
            SlotShape::SingleClause => {
                target.set(slot.name.as_ref(), element);
                true
            }
            _ => match target.elements_mut(&slot.name) {
                Some(members) => {
                    members.insert(0, element);
                    true
                }
                None => false,
            },
        }
    }

    fn insert_relative(&self, root: &mut Element, path: &Path, element: Element, mode: InsertMode) -> bool {
        let Some(resolution) = path.resolve() else {
            return false;
        };
        match resolution {
            Resolution::ArrayItem { array, index }
            | Resolution::IndexedMember { array, index, .. } => {
                let Some((owner, field)) = list_owner_mut(root, &array) else {
                    return false;
                };
                let Some(members) = self.positional_members(owner, &field, index) else {
                    debug!(path = %path, "Insert target list does not exist");
                    return false;
                };
                let len = members.len();
                match mode {
                    InsertMode::Prepend => members.insert(index.min(len), element),
                    InsertMode::Append => members.insert((index + 1).min(len), element),
                    _ if index < len => members[index] = element,
                    _ => members.push(element),
                }
                true
            }
            Resolution::ObjectField { object, field } => {
                if mode != InsertMode::Replace {
                    debug!(path = %path, mode = ?mode, "Single slots only accept replacement");
                    return false;
                }
                let is_root_source = object.len() == 1 && field == "from";
                let Some(owner) = resolve_element_mut(root, &object) else {
                    return false;
                };
                if is_root_source {
                    if let Some(source) = owner.child_mut("from") {
                        source.merge_in_place(element);
                        return true;
                    }
                }
                owner.set(field, element);
                true
            }
        }
    }

    /// The list a positional insert lands in. A missing list is only created
    /// for index 0 of a declared branch or clause slot (an empty-branch
    /// placeholder).
    fn positional_members<'e>(
        &self,
        owner: &'e mut Element,
        field: &str,
        index: usize,
    ) -> Option<&'e mut Vec<Element>> {
        if owner.get(field).is_none() {
            let declared = element_slots(owner, self.catalog)
                .iter()
                .any(|slot| slot.name == field && slot.shape != SlotShape::SingleClause);
            if !declared || index > 0 {
                return None;
            }
        }
        owner.elements_mut(field)
    }

    /// Removes what `path` addresses. The root source step is never removed:
    /// its `uri` is cleared instead.
    pub fn remove(&self, root: &mut Element, path: &Path) -> Option<Node> {
        if is_root_source(root, path) {
            let source = root.child_mut("from")?;
            source.set("uri", Value::String(String::new()));
            return None;
        }
        self.take(root, path)
    }

    fn take(&self, root: &mut Element, path: &Path) -> Option<Node> {
        match path.resolve()? {
            Resolution::ArrayItem { array, index }
            | Resolution::IndexedMember { array, index, .. } => {
                if let Some((owner, field)) = list_owner_mut(root, &array) {
                    if let Some(Node::Elements(members)) = owner.get_mut(&field) {
                        if index >= members.len() {
                            return None;
                        }
                        let removed = members.remove(index);
                        if members.is_empty() {
                            owner.remove(&field);
                        }
                        return Some(Node::Element(Box::new(removed)));
                    }
                }
                match resolve_mut(root, &array)? {
                    NodeMut::Value(Value::Array(items)) if index < items.len() => {
                        Some(Node::Value(items.remove(index)))
                    }
                    _ => None,
                }
            }
            Resolution::ObjectField { object, field } => match resolve_mut(root, &object)? {
                NodeMut::Element(owner) => owner.remove(&field),
                NodeMut::Value(Value::Object(map)) => map.shift_remove(&field).map(Node::Value),
                _ => None,
            },
        }
    }

    /// Moves the element at `from` to the position addressed by `to`.
    ///
    /// The destination is re-addressed after the source is spliced out, so a
    /// node moved down its own list lands where the target node was. A
    /// placeholder destination means index 0 of that branch.
    pub fn move_node(&self, root: &mut Element, from: &Path, to: &Path) -> bool {
        if is_root_source(root, from) || to.starts_with(from) {
            return false;
        }
        if !matches!(resolve(root, from), Some(NodeRef::Element(_))) {
            return false;
        }
        let source = match from.resolve() {
            Some(Resolution::ArrayItem { array, index })
            | Some(Resolution::IndexedMember { array, index, .. }) => Some((array, index)),
            Some(Resolution::ObjectField { .. }) => None,
            None => return false,
        };

        let Some(Node::Element(moved)) = self.take(root, from) else {
            return false;
        };
        let moved = *moved;

        let destination = match &source {
            Some((array, index)) => to.rebased_after_removal(array, *index),
            None => to.clone(),
        };
        let destination = if destination.is_placeholder() {
            placeholder_target(&destination)
        } else {
            destination
        };

        let restore = moved.clone();
        if self.insert_relative(root, &destination, moved, InsertMode::Prepend) {
            debug!(from = %from, to = %to, "Moved step");
            return true;
        }

        debug!(from = %from, to = %to, "Move destination missing, restoring step");
        match source {
            Some((array, index)) => {
                if let Some((owner, field)) = list_owner_mut(root, &array) {
                    if let Some(members) = owner.elements_mut(&field) {
                        members.insert(index.min(members.len()), restore);
                    }
                }
            }
            None => {
                if let Some(Resolution::ObjectField { object, field }) = from.resolve() {
                    if let Some(owner) = resolve_element_mut(root, &object) {
                        owner.set(field, restore);
                    }
                }
            }
        }
        false
    }
}

/// `a.steps.0.placeholder` addresses index 0 of `a.steps`.
fn placeholder_target(path: &Path) -> Path {
    match path.resolve() {
        Some(Resolution::IndexedMember { array, .. }) => array.index(0),
        _ => path.clone(),
    }
}

fn is_root_source(root: &Element, path: &Path) -> bool {
    root.kind.is(StepKind::Route)
        && path.len() == 2
        && path.segments()[0].as_field() == Some(root.kind.name())
        && path.segments()[1].as_field() == Some("from")
}
