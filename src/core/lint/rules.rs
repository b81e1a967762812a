use super::{EntityLintRule, LintResult, LintSeverity};
use crate::core::catalog::{CatalogKind, CatalogLookup};
use crate::core::model::{element_slots, walk, Element, ElementKind, Node, Path, SlotShape, StepKind};
use serde_json::Value;
use std::collections::BTreeMap;

pub fn built_in_rules() -> Vec<Box<dyn EntityLintRule>> {
    vec![
        Box::new(DuplicateStepIdsRule),
        Box::new(RequiredFieldsRule),
        Box::new(EmptySourceUriRule),
        Box::new(UntypedElementRule),
        Box::new(EmptyBranchRule),
    ]
}

fn is_present(node: &Node) -> bool {
    match node {
        Node::Value(Value::Null) => false,
        Node::Value(Value::String(text)) => !text.trim().is_empty(),
        Node::Value(Value::Array(items)) => !items.is_empty(),
        Node::Value(_) | Node::Element(_) => true,
        Node::Elements(members) => !members.is_empty(),
    }
}

struct DuplicateStepIdsRule;

impl EntityLintRule for DuplicateStepIdsRule {
    fn validate(&self, root: &Element, root_path: &Path, catalog: &dyn CatalogLookup) -> Vec<LintResult> {
        let mut seen: BTreeMap<&str, Vec<Path>> = BTreeMap::new();
        walk(root, root_path, catalog, &mut |path, element| {
            if let Some(id) = element.id() {
                seen.entry(id).or_default().push(path.clone());
            }
        });

        let mut out = Vec::new();
        for (id, paths) in seen {
            if paths.len() < 2 {
                continue;
            }
            for path in paths.iter().skip(1) {
                out.push(LintResult::new(
                    "RF-LINT-001",
                    LintSeverity::Error,
                    format!("duplicate step id '{}' found {} times", id, paths.len()),
                    Some(path.to_string()),
                    Some("give every step a unique id".to_string()),
                ));
            }
        }
        out
    }
}

struct RequiredFieldsRule;

impl RequiredFieldsRule {
    fn required(element: &Element, catalog: &dyn CatalogLookup) -> Vec<String> {
        match &element.kind {
            ElementKind::Step(kind) => kind.required_fields().iter().map(|f| f.to_string()).collect(),
            ElementKind::Untyped(name) => catalog
                .get(CatalogKind::Processor, name)
                .map(|definition| definition.required.clone())
                .unwrap_or_default(),
        }
    }
}

impl EntityLintRule for RequiredFieldsRule {
    fn validate(&self, root: &Element, root_path: &Path, catalog: &dyn CatalogLookup) -> Vec<LintResult> {
        let mut out = Vec::new();
        walk(root, root_path, catalog, &mut |path, element| {
            for field in Self::required(element, catalog) {
                if element.get(&field).is_none() {
                    out.push(LintResult::new(
                        "RF-LINT-002",
                        LintSeverity::Error,
                        format!("{} is missing required field '{}'", element.kind, field),
                        Some(path.to_string()),
                        Some(format!("set '{}' on this step", field)),
                    ));
                }
            }
        });
        out
    }
}

/// A source that is present but has a blank `uri`, which is what removing the
/// root source leaves behind.
struct EmptySourceUriRule;

impl EntityLintRule for EmptySourceUriRule {
    fn validate(&self, root: &Element, root_path: &Path, catalog: &dyn CatalogLookup) -> Vec<LintResult> {
        let mut out = Vec::new();
        walk(root, root_path, catalog, &mut |path, element| {
            if !element.kind.is(StepKind::From) {
                return;
            }
            if let Some(node) = element.get("uri") {
                if !is_present(node) {
                    out.push(LintResult::new(
                        "RF-LINT-003",
                        LintSeverity::Error,
                        "source endpoint uri is empty",
                        Some(path.to_string()),
                        Some("pick a component for the route source".to_string()),
                    ));
                }
            }
        });
        out
    }
}

struct UntypedElementRule;

impl EntityLintRule for UntypedElementRule {
    fn validate(&self, root: &Element, root_path: &Path, catalog: &dyn CatalogLookup) -> Vec<LintResult> {
        let mut out = Vec::new();
        walk(root, root_path, catalog, &mut |path, element| {
            let ElementKind::Untyped(name) = &element.kind else {
                return;
            };
            let known = catalog.get(CatalogKind::Processor, name).is_some()
                || catalog.get(CatalogKind::Component, name).is_some();
            let (severity, message) = if known {
                (LintSeverity::Info, format!("'{}' is only described by the catalog", name))
            } else {
                (LintSeverity::Warning, format!("unknown step kind '{}'", name))
            };
            out.push(LintResult::new(
                "RF-LINT-004",
                severity,
                message,
                Some(path.to_string()),
                None,
            ));
        });
        out
    }
}

struct EmptyBranchRule;

impl EntityLintRule for EmptyBranchRule {
    fn validate(&self, root: &Element, root_path: &Path, catalog: &dyn CatalogLookup) -> Vec<LintResult> {
        let mut out = Vec::new();
        walk(root, root_path, catalog, &mut |path, element| {
            for slot in element_slots(element, catalog) {
                if slot.shape == SlotShape::Branch && element.elements(&slot.name).is_empty() {
                    out.push(LintResult::new(
                        "RF-LINT-005",
                        LintSeverity::Info,
                        format!("{} has no steps in '{}'", element.kind, slot.name),
                        Some(path.field(&slot.name).to_string()),
                        Some("add a step or remove the container".to_string()),
                    ));
                }
            }
        });
        out
    }
}
