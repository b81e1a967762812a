//! Read-only registry of step, component and entity definitions.
//!
//! The core never owns catalog data. It is handed a `&dyn CatalogLookup` and
//! uses it for labels, default skeletons and slot hints of kinds the static
//! table does not know.

#![allow(clippy::result_large_err)]

pub mod defaults;

use crate::core::error::AppError;
use crate::core::model::SlotShape;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

pub use defaults::{
    CatalogDefaults, DefaultValueProvider, DefinedComponent, StepPlacement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogKind {
    Component,
    Processor,
    Kamelet,
    Entity,
    Language,
    Dataformat,
    Loadbalancer,
}

/// Graph slot declared by a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotHint {
    pub name: String,
    #[serde(rename = "type")]
    pub shape: SlotShape,
    /// Kind of unwrapped clause members; defaults to the slot name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDefinition {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Skeleton body used when a new step of this kind is inserted.
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub slots: Vec<SlotHint>,
    #[serde(default)]
    pub required: Vec<String>,
}

pub trait CatalogLookup {
    fn get(&self, kind: CatalogKind, name: &str) -> Option<&CatalogDefinition>;
}

/// Catalog with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl CatalogLookup for EmptyCatalog {
    fn get(&self, _kind: CatalogKind, _name: &str) -> Option<&CatalogDefinition> {
        None
    }
}

/// On-disk catalog layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    components: IndexMap<String, CatalogDefinition>,
    processors: IndexMap<String, CatalogDefinition>,
    kamelets: IndexMap<String, CatalogDefinition>,
    entities: IndexMap<String, CatalogDefinition>,
    languages: IndexMap<String, CatalogDefinition>,
    dataformats: IndexMap<String, CatalogDefinition>,
    loadbalancers: IndexMap<String, CatalogDefinition>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: HashMap<CatalogKind, IndexMap<String, CatalogDefinition>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a definition; the last registration wins.
    pub fn register(
        &mut self,
        kind: CatalogKind,
        name: impl Into<String>,
        definition: CatalogDefinition,
    ) {
        self.entries
            .entry(kind)
            .or_default()
            .insert(name.into(), definition);
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses a YAML (or JSON) catalog document.
    pub fn from_text(text: &str) -> Result<Self, AppError> {
        let file: CatalogFile = serde_yaml::from_str(text).map_err(|e| {
            AppError::new(
                ErrorCategory::CatalogError,
                format!("Failed to parse catalog: {}", e),
            )
            .with_code("CATALOG_PARSE")
        })?;

        let mut catalog = Self::new();
        let groups = [
            (CatalogKind::Component, file.components),
            (CatalogKind::Processor, file.processors),
            (CatalogKind::Kamelet, file.kamelets),
            (CatalogKind::Entity, file.entities),
            (CatalogKind::Language, file.languages),
            (CatalogKind::Dataformat, file.dataformats),
            (CatalogKind::Loadbalancer, file.loadbalancers),
        ];
        for (kind, definitions) in groups {
            for (name, definition) in definitions {
                catalog.register(kind, name, definition);
            }
        }
        tracing::debug!(entries = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::CatalogError,
                format!("Failed to read catalog file: {}", e),
            )
            .with_context(path.display().to_string())
        })?;
        Self::from_text(&text).map_err(|e| e.with_context(path.display().to_string()))
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn get(&self, kind: CatalogKind, name: &str) -> Option<&CatalogDefinition> {
        self.entries.get(&kind)?.get(name)
    }
}
