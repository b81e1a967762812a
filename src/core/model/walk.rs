use super::element::{Element, Node};
use super::path::Path;
use super::slots::list_is_wrapped;
use crate::core::catalog::CatalogLookup;

/// Visits `element` and every nested element in document order, with the path
/// each one is addressed by.
pub fn walk<'a, F>(element: &'a Element, path: &Path, catalog: &dyn CatalogLookup, visit: &mut F)
where
    F: FnMut(&Path, &'a Element),
{
    visit(path, element);
    for (field, node) in &element.fields {
        match node {
            Node::Value(_) => {}
            Node::Element(child) => walk(child, &path.field(field), catalog, visit),
            Node::Elements(members) => {
                let wrapped = list_is_wrapped(element, field, catalog);
                let list = path.field(field);
                for (index, member) in members.iter().enumerate() {
                    let member_path = if wrapped {
                        list.index(index).field(member.kind.name())
                    } else {
                        list.index(index)
                    };
                    walk(member, &member_path, catalog, visit);
                }
            }
        }
    }
}

/// Paths of every element in the subtree, in visiting order.
pub fn collect_paths(element: &Element, path: &Path, catalog: &dyn CatalogLookup) -> Vec<Path> {
    let mut paths = Vec::new();
    walk(element, path, catalog, &mut |path, _| paths.push(path.clone()));
    paths
}
