use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    DocumentError,
    CatalogError,
    ConfigurationError,
    EditError,
    SerializationError,
    IoError,
    InternalError,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Rendering used when a projected graph is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    #[default]
    Tree,
    Dot,
    Json,
}

impl FromStr for GraphFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(GraphFormat::Tree),
            "dot" => Ok(GraphFormat::Dot),
            "json" => Ok(GraphFormat::Json),
            other => Err(format!(
                "unknown graph format '{}', expected tree, dot or json",
                other
            )),
        }
    }
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GraphFormat::Tree => "tree",
            GraphFormat::Dot => "dot",
            GraphFormat::Json => "json",
        };
        f.write_str(name)
    }
}
