use routeforge::core::catalog::{
    CatalogDefaults, DefinedComponent, EmptyCatalog, InMemoryCatalog,
};
use routeforge::core::document::{CamelDocument, DocumentKind};
use routeforge::core::editor::InsertMode;
use routeforge::core::entities::{AddStepOptions, Entity};
use routeforge::core::model::{Path, StepKind};
use routeforge::core::transform::{document_to_value, parse_document, ParseOutcome};
use serde_json::json;

fn p(text: &str) -> Path {
    text.parse().unwrap()
}

fn parse(text: &str) -> CamelDocument {
    match parse_document(text, &EmptyCatalog).unwrap() {
        ParseOutcome::Supported(document) => document,
        ParseOutcome::Unsupported(reason) => panic!("unsupported document: {reason}"),
    }
}

const FLOWS: &str = r#"
- route:
    id: orders
    from:
      uri: kafka:orders
      steps:
        - log: received
        - to: direct:store
- onException:
    id: errors
    exception: [java.lang.Exception]
    steps:
      - log: failed
- errorHandler:
    deadLetterChannel:
      deadLetterUri: log:dead
"#;

#[test]
fn test_document_lists_only_visual_entities() {
    let document = parse(FLOWS);
    assert_eq!(document.entities.len(), 3);
    let ids: Vec<&str> = document.visual_entities().map(|entity| entity.id()).collect();
    assert_eq!(ids, vec!["orders", "errors"]);
    match &document.entities[2] {
        Entity::NonVisual(raw) => assert_eq!(raw.kind_name(), Some("errorHandler")),
        other => panic!("expected a non-visual entity, got {other:?}"),
    }
}

#[test]
fn test_flows_without_ids_get_generated_ones() {
    let document = parse("- from:\n    uri: timer:a\n- onCompletion:\n    steps:\n      - log: done\n");
    let ids: Vec<String> = document
        .visual_entities()
        .map(|entity| entity.id().to_string())
        .collect();
    assert!(ids[0].starts_with("route-"), "{}", ids[0]);
    assert!(ids[1].starts_with("onCompletion-"), "{}", ids[1]);
}

#[test]
fn test_add_and_remove_entities() {
    let mut document = CamelDocument::new(DocumentKind::Plain);
    let defaults = CatalogDefaults::new(&EmptyCatalog).with_id_digits(5);
    let route_id = document.add_entity(StepKind::Route, &defaults).unwrap();
    let rest_id = document.add_entity(StepKind::Rest, &defaults).unwrap();
    assert_eq!(route_id.len(), "route-".len() + 5);
    assert!(document.add_entity(StepKind::Log, &defaults).is_none());
    assert_eq!(document.visual_entities().count(), 2);

    assert!(document.remove_entity(&route_id));
    assert!(!document.remove_entity(&route_id));
    assert_eq!(document.visual_entities().next().unwrap().id(), rest_id);
}

#[test]
fn test_entity_ids_can_be_renamed() {
    let mut document = parse(FLOWS);
    document.entity_mut("orders").unwrap().set_id("orders-v2");
    assert!(document.entity("orders").is_none());
    let value = document_to_value(&document, &EmptyCatalog);
    assert_eq!(value[0]["route"]["id"], "orders-v2");
}

#[test]
fn test_editing_through_the_entity() {
    let mut document = parse(FLOWS);
    let defaults = CatalogDefaults::new(&EmptyCatalog);
    let route = document.entity_mut("orders").unwrap();

    let options = AddStepOptions {
        definition: DefinedComponent::processor("choice"),
        mode: InsertMode::Prepend,
        target: p("route.from.steps.1.to"),
    };
    assert!(route.add_step(&options, &defaults, &EmptyCatalog));
    assert!(route.move_step(&p("route.from.steps.0.log"), &p("route.from.steps.2.to"), &EmptyCatalog));
    assert!(route.remove_step(&p("route.from.steps.0.choice"), &EmptyCatalog));
    assert!(route.update_model(&p("route.from.steps.0.log.message"), &json!("moved"), &EmptyCatalog));

    let value = document_to_value(&document, &EmptyCatalog);
    assert_eq!(
        value[0]["route"]["from"]["steps"],
        json!([
            {"log": {"message": "moved"}},
            {"to": {"uri": "direct:store"}}
        ])
    );
}

#[test]
fn test_interactions_of_an_exception_flow() {
    let document = parse(FLOWS);
    let flow = document.entity("errors").unwrap();
    let root = flow.interactions(&p("onException"), &EmptyCatalog);
    assert!(root.can_remove_flow && root.can_have_children);
    assert!(!root.can_remove_step && !root.can_have_next_step);

    let log = flow.interactions(&p("onException.steps.0.log"), &EmptyCatalog);
    assert!(log.can_have_previous_step && log.can_have_next_step && log.can_remove_step);
    assert!(!log.can_remove_flow);

    assert_eq!(
        flow.interactions(&p("onException.steps.4.log"), &EmptyCatalog),
        Default::default()
    );
}

#[test]
fn test_labels_use_catalog_titles_for_components() {
    let catalog = InMemoryCatalog::from_text(
        "components:\n  kafka:\n    title: Kafka\n    description: Exchange messages with Kafka\n",
    )
    .unwrap();
    let document = parse(FLOWS);
    let route = document.entity("orders").unwrap();
    assert_eq!(route.label(&p("route"), &catalog), "orders");
    assert_eq!(route.label(&p("route.from"), &catalog), "Kafka");
    assert_eq!(route.tooltip(&p("route.from"), &catalog), "Exchange messages with Kafka");
    assert_eq!(route.label(&p("route.from.steps.0.log"), &catalog), "log");
    assert_eq!(route.label(&p("route.from.steps.9.log"), &catalog), "");
}

#[test]
fn test_validation_hides_informational_results() {
    let document = parse("- route:\n    id: r\n    from:\n      uri: timer:a\n");
    let route = document.entity("r").unwrap();
    assert!(route.validate(&EmptyCatalog).is_empty());

    let document = parse("- route:\n    id: r\n    from:\n      uri: timer:a\n      steps:\n        - to: {}\n");
    let route = document.entity("r").unwrap();
    let issues = route.validate(&EmptyCatalog);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path, "route.from.steps.0.to");
    assert!(route.validation_text(&p("route.from.steps.0.to"), &EmptyCatalog).is_some());
}

#[test]
fn test_graph_of_an_exception_flow() {
    let document = parse(FLOWS);
    let graph = document.entity("errors").unwrap().to_graph(&EmptyCatalog).unwrap();
    let root = graph.root().unwrap();
    assert_eq!(graph.node(root).processor_name, "onException");
    assert_eq!(graph.children(root).len(), 1);
}

#[test]
fn test_add_step_options_load_from_json() {
    let options: AddStepOptions = serde_json::from_value(json!({
        "definition": {"kind": "component", "name": "kafka"},
        "mode": "special-child",
        "target": "route.from.steps.0.choice"
    }))
    .unwrap();
    assert_eq!(options.definition, DefinedComponent::component("kafka"));
    assert_eq!(options.mode, InsertMode::SpecialChild);
    assert_eq!(options.target, p("route.from.steps.0.choice"));

    let bad = serde_json::from_value::<AddStepOptions>(json!({
        "definition": {"kind": "processor", "name": "log"},
        "mode": "append",
        "target": ""
    }));
    assert!(bad.is_err());
}
