use super::{CatalogKind, CatalogLookup};
use crate::core::model::{random_id, Element, ElementKind, StepKind};
use crate::core::transform::reader::Reader;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Where a new step is going to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepPlacement {
    /// The consumer at the start of a route.
    Source,
    #[default]
    Step,
}

/// A palette entry the user picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinedComponent {
    pub kind: CatalogKind,
    pub name: String,
    #[serde(default)]
    pub placement: StepPlacement,
}

impl DefinedComponent {
    pub fn processor(name: &str) -> Self {
        Self {
            kind: CatalogKind::Processor,
            name: name.to_string(),
            placement: StepPlacement::Step,
        }
    }

    pub fn component(name: &str) -> Self {
        Self {
            kind: CatalogKind::Component,
            name: name.to_string(),
            placement: StepPlacement::Step,
        }
    }

    pub fn entity(name: &str) -> Self {
        Self {
            kind: CatalogKind::Entity,
            name: name.to_string(),
            placement: StepPlacement::Step,
        }
    }

    pub fn as_source(mut self) -> Self {
        self.placement = StepPlacement::Source;
        self
    }
}

/// Supplies the skeleton element inserted for a palette entry.
pub trait DefaultValueProvider {
    fn default_value(&self, component: &DefinedComponent) -> Element;
}

/// Default skeletons built from catalog `defaultValue`s, falling back to
/// built-in templates for the common processors.
pub struct CatalogDefaults<'a> {
    catalog: &'a dyn CatalogLookup,
    id_digits: usize,
}

impl<'a> CatalogDefaults<'a> {
    pub fn new(catalog: &'a dyn CatalogLookup) -> Self {
        Self {
            catalog,
            id_digits: 4,
        }
    }

    pub fn with_id_digits(mut self, digits: usize) -> Self {
        self.id_digits = digits;
        self
    }

    fn id(&self, kind: &str) -> String {
        random_id(kind, self.id_digits)
    }

    fn endpoint(&self, uri: String, placement: StepPlacement) -> (String, Value) {
        match placement {
            StepPlacement::Source => (
                "from".to_string(),
                json!({ "id": self.id("from"), "uri": uri, "steps": [] }),
            ),
            StepPlacement::Step => (
                "to".to_string(),
                json!({ "id": self.id("to"), "uri": uri }),
            ),
        }
    }

    fn log_step(&self) -> Value {
        json!({ "log": { "id": self.id("log"), "message": "${body}" } })
    }

    fn processor_template(&self, name: &str) -> Value {
        match StepKind::from_name(name) {
            Some(StepKind::Choice) => json!({
                "id": self.id("choice"),
                "when": [{
                    "id": self.id("when"),
                    "expression": { "simple": {} },
                    "steps": [self.log_step()]
                }],
                "otherwise": { "id": self.id("otherwise"), "steps": [self.log_step()] }
            }),
            Some(StepKind::DoTry) => json!({
                "id": self.id("doTry"),
                "steps": [],
                "doCatch": [{ "id": self.id("doCatch"), "exception": ["java.lang.Exception"] }],
                "doFinally": { "id": self.id("doFinally") }
            }),
            Some(StepKind::CircuitBreaker) => json!({
                "id": self.id("circuitBreaker"),
                "onFallback": { "id": self.id("onFallback") }
            }),
            Some(StepKind::DoCatch) => json!({
                "id": self.id("doCatch"),
                "exception": ["java.lang.Exception"]
            }),
            Some(StepKind::When) => json!({
                "id": self.id("when"),
                "expression": { "simple": {} }
            }),
            Some(StepKind::Log) => json!({ "id": self.id("log"), "message": "${body}" }),
            Some(kind) if kind.family().has_step_name() => json!({ "id": self.id(name) }),
            _ => json!({}),
        }
    }

    fn entity_template(&self, name: &str) -> Value {
        match StepKind::from_name(name) {
            Some(StepKind::Route) => json!({
                "id": self.id("route"),
                "from": {
                    "id": self.id("from"),
                    "uri": "timer:template",
                    "parameters": { "period": "1000" },
                    "steps": [self.log_step()]
                }
            }),
            Some(StepKind::OnException) => json!({
                "id": self.id("onException"),
                "exception": ["java.lang.Exception"],
                "steps": [self.log_step()]
            }),
            Some(StepKind::OnCompletion) => json!({
                "id": self.id("onCompletion"),
                "steps": [self.log_step()]
            }),
            Some(StepKind::Rest) => json!({
                "id": self.id("rest"),
                "get": [{ "id": self.id("get"), "path": "/hello", "to": "direct:hello" }]
            }),
            _ => json!({ "id": self.id(name) }),
        }
    }
}

impl DefaultValueProvider for CatalogDefaults<'_> {
    fn default_value(&self, component: &DefinedComponent) -> Element {
        let name = component.name.as_str();
        let catalog_default = self
            .catalog
            .get(component.kind, name)
            .and_then(|definition| definition.default_value.clone());

        let (kind, body) = match component.kind {
            CatalogKind::Component => {
                let uri = catalog_default
                    .as_ref()
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| name.to_string());
                self.endpoint(uri, component.placement)
            }
            CatalogKind::Kamelet => self.endpoint(format!("kamelet:{}", name), component.placement),
            CatalogKind::Entity => (
                name.to_string(),
                catalog_default.unwrap_or_else(|| self.entity_template(name)),
            ),
            _ => (
                name.to_string(),
                catalog_default.unwrap_or_else(|| self.processor_template(name)),
            ),
        };

        match Reader::new(self.catalog).read_named(&kind, &body) {
            Ok(element) => element,
            Err(err) => {
                tracing::warn!(kind = %kind, error = %err, "Default skeleton is malformed, using an empty step");
                Element::new(ElementKind::from_name(&kind))
            }
        }
    }
}
