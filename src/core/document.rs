//! The in-memory form of one workflow file.

use crate::core::catalog::{DefaultValueProvider, DefinedComponent};
use crate::core::entities::{Entity, VisualEntity};
use crate::core::model::StepKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Which outer layout a new document is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A bare list of flows.
    #[default]
    Plain,
    /// An `Integration` custom resource holding flows under `spec.flows`.
    Integration,
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(DocumentKind::Plain),
            "integration" => Ok(DocumentKind::Integration),
            other => Err(format!("unknown document kind '{}'", other)),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Plain => write!(f, "plain"),
            DocumentKind::Integration => write!(f, "integration"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentShape {
    Plain,
    /// Everything but `spec.flows`, kept as read.
    Integration { header: Map<String, Value> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CamelDocument {
    pub shape: DocumentShape,
    pub entities: Vec<Entity>,
}

impl CamelDocument {
    pub fn new(kind: DocumentKind) -> Self {
        let shape = match kind {
            DocumentKind::Plain => DocumentShape::Plain,
            DocumentKind::Integration => {
                let header = json!({
                    "apiVersion": "camel.apache.org/v1",
                    "kind": "Integration",
                    "metadata": { "name": "integration" },
                    "spec": {}
                });
                DocumentShape::Integration {
                    header: header.as_object().cloned().unwrap_or_default(),
                }
            }
        };
        Self {
            shape,
            entities: Vec::new(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self.shape {
            DocumentShape::Plain => DocumentKind::Plain,
            DocumentShape::Integration { .. } => DocumentKind::Integration,
        }
    }

    pub fn visual_entities(&self) -> impl Iterator<Item = &dyn VisualEntity> {
        self.entities.iter().filter_map(Entity::as_visual)
    }

    pub fn entity(&self, id: &str) -> Option<&dyn VisualEntity> {
        self.visual_entities().find(|entity| entity.id() == id)
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut dyn VisualEntity> {
        self.entities
            .iter_mut()
            .filter_map(Entity::as_visual_mut)
            .find(|entity| entity.id() == id)
    }

    /// Appends a new visual entity seeded from its default skeleton and
    /// returns its id.
    pub fn add_entity(&mut self, kind: StepKind, defaults: &dyn DefaultValueProvider) -> Option<String> {
        if !Entity::is_visual_kind(kind.name()) {
            return None;
        }
        let root = defaults.default_value(&DefinedComponent::entity(kind.name()));
        let entity = Entity::from_root(root)?;
        let id = entity.id().map(str::to_string);
        tracing::debug!(kind = %kind, id = ?id, "Added entity");
        self.entities.push(entity);
        id
    }

    /// Drops the entity with `id`; non-visual items are matched by their body id.
    pub fn remove_entity(&mut self, id: &str) -> bool {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.id() != Some(id));
        before != self.entities.len()
    }
}

impl Default for CamelDocument {
    fn default() -> Self {
        Self::new(DocumentKind::Plain)
    }
}
