//! Visual entities: the top-level flows a document holds, each owning one
//! element tree and exposing the operations a canvas needs.

mod flows;
mod non_visual;
mod route;

pub use flows::{OnCompletionEntity, OnExceptionEntity, RestEntity, RouteConfigurationEntity};
pub use non_visual::NonVisualEntity;
pub use route::RouteEntity;

use crate::core::catalog::{
    CatalogDefinition, CatalogKind, CatalogLookup, DefaultValueProvider, DefinedComponent,
};
use crate::core::editor::{resolve, InsertMode, NodeRef, StructuralEditor};
use crate::core::lint::{LintRegistry, LintSeverity};
use crate::core::model::{
    element_slots, random_id, Element, ElementKind, Family, Path, SlotShape, StepKind,
};
use crate::core::visualization::{NodeMapperService, ProjectionError, VisualizationGraph};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_ID_DIGITS: usize = 4;

/// What the canvas may offer on one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInteraction {
    pub can_have_previous_step: bool,
    pub can_have_next_step: bool,
    pub can_have_children: bool,
    pub can_have_special_children: bool,
    pub can_remove_step: bool,
    pub can_replace_step: bool,
    pub can_remove_flow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStepOptions {
    pub definition: DefinedComponent,
    pub mode: InsertMode,
    pub target: Path,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

/// Sets a generated `<kind>-NNNN` id on `root` when it has none.
pub(crate) fn ensure_id(root: &mut Element) {
    if root.id().is_none() {
        let id = random_id(root.kind.name(), DEFAULT_ID_DIGITS);
        root.set_id(&id);
    }
}

fn catalog_definition<'c>(element: &Element, catalog: &'c dyn CatalogLookup) -> Option<&'c CatalogDefinition> {
    let component = element.component_name().and_then(|name| {
        match name.strip_prefix("kamelet:") {
            Some(kamelet) => catalog.get(CatalogKind::Kamelet, kamelet),
            None => catalog.get(CatalogKind::Component, &name),
        }
    });
    component
        .or_else(|| catalog.get(CatalogKind::Processor, element.kind.name()))
        .or_else(|| catalog.get(CatalogKind::Entity, element.kind.name()))
}

fn family_of(kind: &ElementKind) -> Option<Family> {
    kind.step().map(StepKind::family)
}

/// Entity roots, the source and clause members never get siblings.
fn sits_in_sequence(element: &Element, path: &Path) -> bool {
    match family_of(&element.kind) {
        Some(Family::Entity | Family::Source | Family::Clause | Family::RestVerb) => false,
        Some(_) => true,
        None => {
            let segments = path.segments();
            segments.len() >= 2
                && segments[segments.len() - 1].as_field() == Some(element.kind.name())
                && segments[segments.len() - 2].as_index().is_some()
        }
    }
}

fn is_replaceable(element: &Element) -> bool {
    !matches!(
        family_of(&element.kind),
        Some(Family::Entity | Family::Clause | Family::RestVerb)
    )
}

/// A top-level flow with one element tree and a fixed root path.
pub trait VisualEntity {
    /// Kind of the entity root.
    fn kind(&self) -> StepKind;

    fn root(&self) -> &Element;

    fn root_mut(&mut self) -> &mut Element;

    fn root_path(&self) -> Path {
        Path::root(self.kind().name())
    }

    fn id(&self) -> &str {
        self.root().id().unwrap_or_default()
    }

    fn set_id(&mut self, id: &str) {
        self.root_mut().set_id(id);
    }

    /// Path of the step that starts this flow, if the kind has one.
    fn source_path(&self) -> Option<Path> {
        None
    }

    /// Short text shown on the node.
    fn label(&self, path: &Path, catalog: &dyn CatalogLookup) -> String {
        if *path == self.root_path() {
            let root = self.root();
            return root
                .description()
                .or(root.id())
                .unwrap_or(self.kind().name())
                .to_string();
        }
        let Some(element) = self.element_at(path) else {
            return String::new();
        };
        element
            .description()
            .map(str::to_string)
            .or_else(|| catalog_definition(element, catalog).and_then(|d| d.title.clone()))
            .unwrap_or_else(|| element.kind.name().to_string())
    }

    /// Catalog title of the node's kind.
    fn title(&self, path: &Path, catalog: &dyn CatalogLookup) -> String {
        let Some(element) = self.element_at(path) else {
            return String::new();
        };
        catalog_definition(element, catalog)
            .and_then(|d| d.title.clone())
            .unwrap_or_else(|| element.kind.name().to_string())
    }

    fn tooltip(&self, path: &Path, catalog: &dyn CatalogLookup) -> String {
        let Some(element) = self.element_at(path) else {
            return String::new();
        };
        if *path == self.root_path() {
            if let Some(description) = element.description() {
                return description.to_string();
            }
            return format!("{} {}", self.kind(), self.id());
        }
        element
            .description()
            .map(str::to_string)
            .or_else(|| catalog_definition(element, catalog).and_then(|d| d.description.clone()))
            .unwrap_or_else(|| self.label(path, catalog))
    }

    fn element_at(&self, path: &Path) -> Option<&Element> {
        resolve(self.root(), path).and_then(NodeRef::as_element)
    }

    fn interactions(&self, path: &Path, catalog: &dyn CatalogLookup) -> NodeInteraction {
        let Some(element) = self.element_at(path) else {
            return NodeInteraction::default();
        };
        let is_root = *path == self.root_path();
        let is_source = self.source_path().as_ref() == Some(path);
        let slots = element_slots(element, catalog);
        let in_sequence = !is_root && sits_in_sequence(element, path);

        NodeInteraction {
            can_have_previous_step: in_sequence,
            can_have_next_step: in_sequence,
            can_have_children: slots
                .iter()
                .any(|slot| slot.shape == SlotShape::Branch && slot.name == "steps"),
            can_have_special_children: slots.iter().any(|slot| slot.shape != SlotShape::Branch),
            can_remove_step: !is_root && !is_source,
            can_replace_step: is_source || (!is_root && is_replaceable(element)),
            can_remove_flow: is_root,
        }
    }

    /// Inserts the default skeleton for `options.definition` at `options.target`.
    fn add_step(
        &mut self,
        options: &AddStepOptions,
        defaults: &dyn DefaultValueProvider,
        catalog: &dyn CatalogLookup,
    ) -> bool {
        let definition = if self.source_path().as_ref() == Some(&options.target) {
            options.definition.clone().as_source()
        } else {
            options.definition.clone()
        };
        let element = defaults.default_value(&definition);
        let changed =
            StructuralEditor::new(catalog).insert(self.root_mut(), &options.target, element, options.mode);
        debug!(entity = %self.id(), target = %options.target, mode = ?options.mode, changed, "Added step");
        changed
    }

    fn remove_step(&mut self, path: &Path, catalog: &dyn CatalogLookup) -> bool {
        if *path == self.root_path() {
            return false;
        }
        let is_source = self.source_path().as_ref() == Some(path);
        let removed = StructuralEditor::new(catalog).remove(self.root_mut(), path);
        debug!(entity = %self.id(), path = %path, "Removed step");
        removed.is_some() || is_source
    }

    fn move_step(&mut self, from: &Path, to: &Path, catalog: &dyn CatalogLookup) -> bool {
        StructuralEditor::new(catalog).move_node(self.root_mut(), from, to)
    }

    /// Writes a generic value at `path`.
    fn update_model(&mut self, path: &Path, value: &Value, catalog: &dyn CatalogLookup) -> bool {
        StructuralEditor::new(catalog).write(self.root_mut(), path, value)
    }

    fn to_graph(&self, catalog: &dyn CatalogLookup) -> Result<VisualizationGraph, ProjectionError> {
        NodeMapperService::new(catalog).project_tree(&self.root_path(), self.root())
    }

    /// Error and warning diagnostics for the whole tree.
    fn validate(&self, catalog: &dyn CatalogLookup) -> Vec<ValidationIssue> {
        let root_path = self.root_path();
        LintRegistry::new()
            .run(self.root(), &root_path, catalog)
            .into_iter()
            .filter(|result| result.severity != LintSeverity::Info)
            .map(|result| ValidationIssue {
                path: result.location.unwrap_or_else(|| root_path.to_string()),
                message: result.message,
            })
            .collect()
    }

    /// Issues attached to one node, one per line.
    fn validation_text(&self, path: &Path, catalog: &dyn CatalogLookup) -> Option<String> {
        let path = path.to_string();
        let messages: Vec<String> = self
            .validate(catalog)
            .into_iter()
            .filter(|issue| issue.path == path)
            .map(|issue| issue.message)
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(messages.join("\n"))
        }
    }
}

/// One top-level document item.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Route(RouteEntity),
    RouteConfiguration(RouteConfigurationEntity),
    OnException(OnExceptionEntity),
    OnCompletion(OnCompletionEntity),
    Rest(RestEntity),
    NonVisual(NonVisualEntity),
}

impl Entity {
    /// Wraps a read entity root; kinds without a visual form yield `None`.
    pub fn from_root(root: Element) -> Option<Self> {
        Some(match root.step_kind()? {
            StepKind::Route => Entity::Route(RouteEntity::new(root)),
            StepKind::RouteConfiguration => {
                Entity::RouteConfiguration(RouteConfigurationEntity::new(root))
            }
            StepKind::OnException => Entity::OnException(OnExceptionEntity::new(root)),
            StepKind::OnCompletion => Entity::OnCompletion(OnCompletionEntity::new(root)),
            StepKind::Rest => Entity::Rest(RestEntity::new(root)),
            _ => return None,
        })
    }

    pub fn is_visual_kind(name: &str) -> bool {
        matches!(
            StepKind::from_name(name),
            Some(
                StepKind::Route
                    | StepKind::RouteConfiguration
                    | StepKind::OnException
                    | StepKind::OnCompletion
                    | StepKind::Rest
            )
        )
    }

    pub fn as_visual(&self) -> Option<&dyn VisualEntity> {
        match self {
            Entity::Route(entity) => Some(entity),
            Entity::RouteConfiguration(entity) => Some(entity),
            Entity::OnException(entity) => Some(entity),
            Entity::OnCompletion(entity) => Some(entity),
            Entity::Rest(entity) => Some(entity),
            Entity::NonVisual(_) => None,
        }
    }

    pub fn as_visual_mut(&mut self) -> Option<&mut dyn VisualEntity> {
        match self {
            Entity::Route(entity) => Some(entity),
            Entity::RouteConfiguration(entity) => Some(entity),
            Entity::OnException(entity) => Some(entity),
            Entity::OnCompletion(entity) => Some(entity),
            Entity::Rest(entity) => Some(entity),
            Entity::NonVisual(_) => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Entity::NonVisual(entity) => entity.id(),
            _ => self.as_visual().map(|entity| entity.id()),
        }
    }
}
