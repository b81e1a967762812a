#![allow(clippy::result_large_err)]

use crate::core::catalog::InMemoryCatalog;
use crate::core::config::{loader::CONFIG_FILE_NAME, ConfigLoader, ForgeConfig};
use crate::core::error::AppError;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration and catalog shared by every command.
pub struct CliContext {
    pub config: ForgeConfig,
    pub catalog: InMemoryCatalog,
}

impl CliContext {
    /// Loads `config_path` (or ./routeforge.toml) and the catalog it names;
    /// `catalog_override` wins over the configured catalog.
    pub fn load(config_path: Option<&Path>, catalog_override: Option<&Path>) -> Result<Self, AppError> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(CONFIG_FILE_NAME),
        };
        let config = ConfigLoader::load(&config_path)?;

        let catalog_path = catalog_override
            .map(Path::to_path_buf)
            .or_else(|| config.catalog.path.clone());
        let catalog = match catalog_path {
            Some(path) => InMemoryCatalog::load(&path)?,
            None => InMemoryCatalog::new(),
        };
        tracing::debug!(entries = catalog.len(), "Catalog ready");

        Ok(Self { config, catalog })
    }
}
