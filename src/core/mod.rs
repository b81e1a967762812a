pub mod catalog;
pub mod config;
pub mod document;
pub mod editor;
pub mod entities;
pub mod error;
pub mod lint;
pub mod model;
pub mod transform;
pub mod types;
pub mod visualization;

pub use document::{CamelDocument, DocumentKind};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use types::*;
