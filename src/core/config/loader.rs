#![allow(clippy::result_large_err)]

use super::ForgeConfig;
use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, GraphFormat};
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "routeforge.toml";

const MAX_ID_DIGITS: usize = 9;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/routeforge.toml)
    /// Environment variables override config file values
    pub fn load_from_workspace(workspace_path: &Path) -> Result<ForgeConfig, AppError> {
        Self::load(&workspace_path.join(CONFIG_FILE_NAME))
    }

    /// Load config from `path`, falling back to defaults when the file is missing,
    /// then apply environment overrides and validate the result
    pub fn load(path: &Path) -> Result<ForgeConfig, AppError> {
        let mut config = Self::load_from_file(path)?.unwrap_or_default();
        Self::apply_env_overrides(&mut config)?;
        Self::validate_config(&config)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<ForgeConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: ForgeConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("CONFIG_PARSE")
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut ForgeConfig) -> Result<(), AppError> {
        if let Ok(catalog) = env::var("ROUTEFORGE_CATALOG") {
            config.catalog.path = Some(PathBuf::from(catalog));
        }

        if let Ok(digits) = env::var("ROUTEFORGE_ID_DIGITS") {
            config.editor.id_digits = digits.trim().parse::<usize>().map_err(|e| {
                AppError::new(
                    ErrorCategory::ConfigurationError,
                    format!("ROUTEFORGE_ID_DIGITS must be a positive integer: {}", e),
                )
            })?;
        }

        if let Ok(format) = env::var("ROUTEFORGE_GRAPH_FORMAT") {
            config.output.graph_format = format
                .parse::<GraphFormat>()
                .map_err(|e| AppError::new(ErrorCategory::ConfigurationError, e))?;
        }

        Ok(())
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "ROUTEFORGE_CATALOG - Override the catalog file path",
            "ROUTEFORGE_ID_DIGITS - Override the digits in generated ids (default: 4)",
            "ROUTEFORGE_GRAPH_FORMAT - Override the graph output format (tree/dot/json, default: tree)",
        ]
    }

    /// Validate configuration values
    pub fn validate_config(config: &ForgeConfig) -> Result<(), AppError> {
        if config.editor.id_digits == 0 || config.editor.id_digits > MAX_ID_DIGITS {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                format!("id_digits must be between 1 and {}", MAX_ID_DIGITS),
            ));
        }

        if let Some(path) = &config.catalog.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::new(
                    ErrorCategory::ValidationError,
                    "Catalog path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
