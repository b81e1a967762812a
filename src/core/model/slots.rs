//! Graph-facing child slots per step kind.
//!
//! The transform table in `kinds` describes every nested element, including
//! property elements such as expressions or data formats. This table keeps
//! only the slots that become graph children. Kinds unknown at compile time
//! take their slots from catalog hints.

use super::element::Element;
use super::kinds::{ChildSpec, StepKind};
use super::path::Path;
use crate::core::catalog::{CatalogKind, CatalogLookup};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotShape {
    /// Sequential flow, members chained previous/next.
    Branch,
    /// At most one clause.
    SingleClause,
    /// Independent clauses, never chained.
    ArrayClause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSlot {
    pub name: Cow<'static, str>,
    pub shape: SlotShape,
    /// Members are written as `{kind: body}` and addressed with a kind segment.
    pub wrapped: bool,
    /// Kind of unwrapped members.
    pub member: Option<Cow<'static, str>>,
}

impl StepSlot {
    const fn branch(name: &'static str) -> Self {
        StepSlot {
            name: Cow::Borrowed(name),
            shape: SlotShape::Branch,
            wrapped: true,
            member: None,
        }
    }

    const fn single(name: &'static str) -> Self {
        StepSlot {
            name: Cow::Borrowed(name),
            shape: SlotShape::SingleClause,
            wrapped: false,
            member: Some(Cow::Borrowed(name)),
        }
    }

    const fn clauses(name: &'static str) -> Self {
        StepSlot {
            name: Cow::Borrowed(name),
            shape: SlotShape::ArrayClause,
            wrapped: false,
            member: Some(Cow::Borrowed(name)),
        }
    }

    const fn wrapped_clauses(name: &'static str) -> Self {
        StepSlot {
            name: Cow::Borrowed(name),
            shape: SlotShape::ArrayClause,
            wrapped: true,
            member: None,
        }
    }

    /// Path of the member at `index` (or of the single member) under `parent`.
    pub fn member_path(&self, parent: &Path, index: usize, member: &Element) -> Path {
        let slot = parent.field(&self.name);
        match self.shape {
            SlotShape::SingleClause => slot,
            _ if self.wrapped => slot.index(index).field(member.kind.name()),
            _ => slot.index(index),
        }
    }
}

const STEPS: &[StepSlot] = &[StepSlot::branch("steps")];
const ROUTE: &[StepSlot] = &[StepSlot::single("from")];
const ROUTE_CONFIGURATION: &[StepSlot] = &[
    StepSlot::wrapped_clauses("intercept"),
    StepSlot::wrapped_clauses("interceptFrom"),
    StepSlot::wrapped_clauses("interceptSendToEndpoint"),
    StepSlot::wrapped_clauses("onException"),
    StepSlot::wrapped_clauses("onCompletion"),
];
const REST: &[StepSlot] = &[
    StepSlot::clauses("get"),
    StepSlot::clauses("post"),
    StepSlot::clauses("put"),
    StepSlot::clauses("patch"),
    StepSlot::clauses("delete"),
    StepSlot::clauses("head"),
];
const CHOICE: &[StepSlot] = &[StepSlot::clauses("when"), StepSlot::single("otherwise")];
const DO_TRY: &[StepSlot] = &[
    StepSlot::branch("steps"),
    StepSlot::clauses("doCatch"),
    StepSlot::single("doFinally"),
];
const CIRCUIT_BREAKER: &[StepSlot] = &[StepSlot::branch("steps"), StepSlot::single("onFallback")];

/// Slots of a statically known kind, in projection order.
pub fn step_slots(kind: StepKind) -> &'static [StepSlot] {
    use StepKind::*;
    match kind {
        Route => ROUTE,
        RouteConfiguration => ROUTE_CONFIGURATION,
        Rest => REST,
        Choice => CHOICE,
        DoTry => DO_TRY,
        CircuitBreaker => CIRCUIT_BREAKER,
        OnException | OnCompletion | Intercept | InterceptFrom | InterceptSendToEndpoint | From
        | When | Otherwise | DoCatch | DoFinally | OnFallback | Aggregate | Filter
        | IdempotentConsumer | LoadBalance | Loop | Multicast | Pipeline | Policy | Resequence
        | Saga | Split | Step | Transacted => STEPS,
        _ => &[],
    }
}

/// Slots of any element, consulting catalog hints for untyped kinds.
pub fn element_slots(element: &Element, catalog: &dyn CatalogLookup) -> Vec<StepSlot> {
    if let Some(kind) = element.step_kind() {
        return step_slots(kind).to_vec();
    }
    let hinted = hint_slots(element.kind.name(), catalog);
    if !hinted.is_empty() {
        return hinted;
    }
    if element.get("steps").and_then(|node| node.as_elements()).is_some() {
        return STEPS.to_vec();
    }
    Vec::new()
}

/// Slots a catalog entry declares for a kind the static table does not know.
pub fn hint_slots(name: &str, catalog: &dyn CatalogLookup) -> Vec<StepSlot> {
    let Some(definition) = catalog.get(CatalogKind::Processor, name) else {
        return Vec::new();
    };
    definition
        .slots
        .iter()
        .map(|hint| StepSlot {
            name: Cow::Owned(hint.name.clone()),
            shape: hint.shape,
            wrapped: hint.shape == SlotShape::Branch,
            member: match hint.shape {
                SlotShape::Branch => None,
                _ => Some(Cow::Owned(
                    hint.kind.clone().unwrap_or_else(|| hint.name.clone()),
                )),
            },
        })
        .collect()
}

/// Whether the members of list field `field` on `element` are `{kind: body}` wrappers.
pub fn list_is_wrapped(element: &Element, field: &str, catalog: &dyn CatalogLookup) -> bool {
    if let Some(kind) = element.step_kind() {
        return match kind.child(field) {
            Some(ChildSpec::List { .. }) => false,
            Some(_) | None => true,
        };
    }
    element_slots(element, catalog)
        .iter()
        .find(|slot| slot.name == field)
        .map(|slot| slot.wrapped)
        .unwrap_or(true)
}
