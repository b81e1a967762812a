//! Fixed compatibility table deciding which nested elements are written as a
//! bare body instead of a `{kind: body}` wrapper. Existing documents depend on
//! these exact rules; entries are listed, not derived.

use crate::core::model::{ElementKind, Family};

/// Step names always written unwrapped under their field key.
pub const UNWRAPPED_STEP_NAMES: &[&str] = &[
    "otherwise",
    "doFinally",
    "resilience4jConfiguration",
    "faultToleranceConfiguration",
    "errorHandler",
    "deadLetterChannel",
    "defaultErrorHandler",
    "jtaTransactionErrorHandler",
    "noErrorHandler",
    "refErrorHandler",
    "springTransactionErrorHandler",
    "redeliveryPolicy",
    "securityDefinitions",
    "apiKey",
    "basicAuth",
    "bearer",
    "mutualTls",
    "oauth2",
    "openIdConnect",
    "onFallback",
    "onWhen",
];

/// Field keys whose value is always written unwrapped.
pub const UNWRAPPED_FIELDS: &[&str] = &["from"];

/// Where a nested element sits inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A single element stored under a field.
    Property,
    /// A member of a wrapped list (`steps` and wrapped clause lists).
    Sequence,
    /// A member of a list that is not a wrapped sequence.
    Clause,
}

pub fn is_written_unwrapped(field: &str, kind: &ElementKind, placement: Placement) -> bool {
    match placement {
        Placement::Clause => true,
        Placement::Sequence => false,
        Placement::Property => {
            if UNWRAPPED_FIELDS.contains(&field) {
                return true;
            }
            if let Some(step) = kind.step() {
                if matches!(
                    step.family(),
                    Family::Expression | Family::Language | Family::DataFormat | Family::LoadBalancer
                ) {
                    return true;
                }
            }
            UNWRAPPED_STEP_NAMES.contains(&kind.name())
        }
    }
}
