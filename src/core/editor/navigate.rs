use crate::core::model::{Element, Node, Path, Segment};
use serde_json::Value;

/// Shared view of whatever a path lands on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Element(&'a Element),
    Elements(&'a [Element]),
    Value(&'a Value),
}

impl<'a> NodeRef<'a> {
    fn from_node(node: &'a Node) -> Self {
        match node {
            Node::Value(value) => NodeRef::Value(value),
            Node::Element(element) => NodeRef::Element(element),
            Node::Elements(elements) => NodeRef::Elements(elements),
        }
    }

    pub fn as_element(self) -> Option<&'a Element> {
        match self {
            NodeRef::Element(element) => Some(element),
            _ => None,
        }
    }

    fn step(self, segment: &Segment) -> Option<NodeRef<'a>> {
        match (self, segment) {
            (NodeRef::Element(element), Segment::Field(name)) => match element.get(name) {
                Some(node) => Some(NodeRef::from_node(node)),
                None if element.kind.name() == name => Some(self),
                None => None,
            },
            (NodeRef::Elements(elements), Segment::Index(index)) => {
                elements.get(*index).map(NodeRef::Element)
            }
            (NodeRef::Value(value), Segment::Field(name)) => value.get(name).map(NodeRef::Value),
            (NodeRef::Value(value), Segment::Index(index)) => value.get(*index).map(NodeRef::Value),
            _ => None,
        }
    }
}

/// Exclusive view of whatever a path lands on.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Element(&'a mut Element),
    Elements(&'a mut Vec<Element>),
    Value(&'a mut Value),
}

impl<'a> NodeMut<'a> {
    fn from_node(node: &'a mut Node) -> Self {
        match node {
            Node::Value(value) => NodeMut::Value(value),
            Node::Element(element) => NodeMut::Element(element),
            Node::Elements(elements) => NodeMut::Elements(elements),
        }
    }

    pub fn into_element(self) -> Option<&'a mut Element> {
        match self {
            NodeMut::Element(element) => Some(element),
            _ => None,
        }
    }

    fn step(self, segment: &Segment) -> Option<NodeMut<'a>> {
        match (self, segment) {
            (NodeMut::Element(element), Segment::Field(name)) => {
                if element.fields.contains_key(name.as_str()) {
                    return element.fields.get_mut(name.as_str()).map(NodeMut::from_node);
                }
                if element.kind.name() == name {
                    Some(NodeMut::Element(element))
                } else {
                    None
                }
            }
            (NodeMut::Elements(elements), Segment::Index(index)) => {
                elements.get_mut(*index).map(NodeMut::Element)
            }
            (NodeMut::Value(value), Segment::Field(name)) => {
                value.get_mut(name.as_str()).map(NodeMut::Value)
            }
            (NodeMut::Value(value), Segment::Index(index)) => {
                value.get_mut(*index).map(NodeMut::Value)
            }
            _ => None,
        }
    }
}

/// Follows `path` from `root`; the first segment names the root kind.
///
/// Inside an element, a segment naming the element's own kind (and no field)
/// stays on the element, which is how `steps.0.log` reaches the `log` member.
pub fn resolve<'a>(root: &'a Element, path: &Path) -> Option<NodeRef<'a>> {
    let (first, rest) = path.segments().split_first()?;
    if first.as_field() != Some(root.kind.name()) {
        return None;
    }
    rest.iter()
        .try_fold(NodeRef::Element(root), |node, segment| node.step(segment))
}

pub fn resolve_mut<'a>(root: &'a mut Element, path: &Path) -> Option<NodeMut<'a>> {
    let (first, rest) = path.segments().split_first()?;
    if first.as_field() != Some(root.kind.name()) {
        return None;
    }
    rest.iter()
        .try_fold(NodeMut::Element(root), |node, segment| node.step(segment))
}

pub fn resolve_element_mut<'a>(root: &'a mut Element, path: &Path) -> Option<&'a mut Element> {
    resolve_mut(root, path)?.into_element()
}

/// The element owning the list at `array` and the list's field name.
pub fn list_owner_mut<'a>(root: &'a mut Element, array: &Path) -> Option<(&'a mut Element, String)> {
    let field = array.last()?.as_field()?.to_string();
    let owner = resolve_element_mut(root, &array.parent()?)?;
    Some((owner, field))
}
