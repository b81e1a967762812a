use crate::core::document::DocumentKind;
use crate::core::types::GraphFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from routeforge.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForgeConfig {
    /// Catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Editor configuration
    #[serde(default)]
    pub editor: EditorConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Catalog file (YAML or JSON); the empty catalog is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Digits in generated step ids
    #[serde(default = "default_id_digits")]
    pub id_digits: usize,

    /// Layout used when a new document is created
    #[serde(default)]
    pub default_document: DocumentKind,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default format of `graph`
    #[serde(default)]
    pub graph_format: GraphFormat,
}

fn default_id_digits() -> usize {
    4
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            id_digits: default_id_digits(),
            default_document: DocumentKind::default(),
        }
    }
}


pub mod loader;

pub use loader::ConfigLoader;
