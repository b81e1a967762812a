//! Entities projected straight from their root element.

use super::{ensure_id, VisualEntity};
use crate::core::model::{Element, StepKind};

macro_rules! root_entity {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            root: Element,
        }

        impl $name {
            pub fn new(mut root: Element) -> Self {
                ensure_id(&mut root);
                Self { root }
            }
        }

        impl VisualEntity for $name {
            fn kind(&self) -> StepKind {
                StepKind::$kind
            }

            fn root(&self) -> &Element {
                &self.root
            }

            fn root_mut(&mut self) -> &mut Element {
                &mut self.root
            }
        }
    };
}

root_entity! {
    /// Global exception handling flow.
    OnExceptionEntity => OnException
}

root_entity! {
    /// Flow run once an exchange completes.
    OnCompletionEntity => OnCompletion
}

root_entity! {
    /// REST service; one clause child per verb entry.
    RestEntity => Rest
}

root_entity! {
    /// Shared interceptors and error flows applied to routes.
    RouteConfigurationEntity => RouteConfiguration
}
