use routeforge::core::catalog::EmptyCatalog;
use routeforge::core::editor::{InsertMode, NodeRef, StructuralEditor};
use routeforge::core::model::{collect_paths, Element, Path, PathParseError, Resolution, StepKind};
use routeforge::core::transform::Reader;
use serde_json::json;

fn p(text: &str) -> Path {
    text.parse().unwrap()
}

fn route() -> Element {
    Reader::new(&EmptyCatalog)
        .read_named(
            "route",
            &json!({
                "id": "r1",
                "from": {
                    "uri": "timer:tick",
                    "parameters": {"period": "1000"},
                    "steps": [
                        {"log": {"id": "log-a", "message": "a"}},
                        {"choice": {
                            "id": "choice-1",
                            "when": [{"id": "when-1", "simple": "${body}", "steps": [{"to": "direct:w"}]}]
                        }},
                        {"to": {"id": "to-c", "uri": "direct:c"}}
                    ]
                }
            }),
        )
        .unwrap()
}

fn step_ids(root: &Element) -> Vec<String> {
    root.child("from")
        .unwrap()
        .steps()
        .iter()
        .map(|step| step.id().unwrap_or("?").to_string())
        .collect()
}

#[test]
fn test_path_parsing_and_display() {
    let path = p("route.from.steps.1.choice.when.0");
    assert_eq!(path.len(), 7);
    assert_eq!(path.to_string(), "route.from.steps.1.choice.when.0");
    assert_eq!("".parse::<Path>().unwrap_err(), PathParseError::Empty);
    assert!(matches!(
        "route..from".parse::<Path>().unwrap_err(),
        PathParseError::EmptySegment(_)
    ));
}

#[test]
fn test_path_resolution_shapes() {
    assert_eq!(
        p("route.from.steps.2").resolve(),
        Some(Resolution::ArrayItem {
            array: p("route.from.steps"),
            index: 2
        })
    );
    assert_eq!(
        p("route.from.steps.2.to").resolve(),
        Some(Resolution::IndexedMember {
            array: p("route.from.steps"),
            index: 2,
            field: "to".to_string()
        })
    );
    assert_eq!(
        p("route.from").resolve(),
        Some(Resolution::ObjectField {
            object: p("route"),
            field: "from".to_string()
        })
    );
    assert!(p("route.from.steps.0.placeholder").is_placeholder());
}

#[test]
fn test_read_values_and_elements() {
    let root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    assert_eq!(
        editor.read_value(&root, &p("route.from.parameters.period")),
        Some(json!("1000"))
    );
    assert_eq!(
        editor.read_value(&root, &p("route.from.steps.0.log")),
        Some(json!({"id": "log-a", "message": "a"}))
    );
    let when = editor
        .read(&root, &p("route.from.steps.1.choice.when.0"))
        .and_then(NodeRef::as_element)
        .unwrap();
    assert!(when.kind.is(StepKind::When));
    assert!(editor.read(&root, &p("route.from.steps.9.log")).is_none());
    assert!(editor.read(&root, &p("rest.get.0")).is_none());
}

#[test]
fn test_write_creates_fields_and_replaces_members() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    assert!(editor.write(&mut root, &p("route.description"), &json!("Ticker")));
    assert_eq!(root.str_field("description"), Some("Ticker"));

    assert!(editor.write(
        &mut root,
        &p("route.from.steps.0.log"),
        &json!({"id": "log-a", "message": "replaced"})
    ));
    assert_eq!(root.child("from").unwrap().steps()[0].str_field("message"), Some("replaced"));

    let before = root.clone();
    assert!(!editor.write(&mut root, &p("route.from.steps.7.log.message"), &json!("x")));
    assert_eq!(root, before);
}

#[test]
fn test_insert_modes_on_a_branch() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    let log = |id: &str| Element::new(StepKind::Log).with_field("id", json!(id));

    assert!(editor.insert(&mut root, &p("route.from.steps.0.log"), log("before"), InsertMode::Prepend));
    assert!(editor.insert(&mut root, &p("route.from.steps.3.to"), log("after"), InsertMode::Append));
    assert_eq!(step_ids(&root), vec!["before", "log-a", "choice-1", "to-c", "after"]);

    assert!(editor.insert(&mut root, &p("route.from"), log("first"), InsertMode::Child));
    assert_eq!(step_ids(&root)[0], "first");

    let before = root.clone();
    assert!(!editor.insert(
        &mut root,
        &p("route.from.steps.1.choice.otherwise.steps.0.log"),
        log("lost"),
        InsertMode::Prepend
    ));
    assert_eq!(root, before);
}

#[test]
fn test_child_mode_requires_a_steps_branch() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    let log = Element::new(StepKind::Log);
    assert!(!editor.insert(&mut root, &p("route.from.steps.0.log"), log, InsertMode::Child));
}

#[test]
fn test_remove_collapses_empty_lists() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    let removed = editor.remove(&mut root, &p("route.from.steps.1.choice.when.0.steps.0"));
    assert!(removed.is_some());
    let when = &root.child("from").unwrap().steps()[1].elements("when")[0];
    assert!(when.get("steps").is_none());

    assert!(editor.remove(&mut root, &p("route.from.steps.0.log")).is_some());
    assert_eq!(step_ids(&root), vec!["choice-1", "to-c"]);
    assert!(editor.remove(&mut root, &p("route.from.steps.5")).is_none());
}

#[test]
fn test_move_down_and_up_the_same_branch() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    assert!(editor.move_node(&mut root, &p("route.from.steps.0.log"), &p("route.from.steps.2.to")));
    assert_eq!(step_ids(&root), vec!["choice-1", "log-a", "to-c"]);
    assert!(editor.move_node(&mut root, &p("route.from.steps.2.to"), &p("route.from.steps.0.choice")));
    assert_eq!(step_ids(&root), vec!["to-c", "choice-1", "log-a"]);
}

#[test]
fn test_move_into_a_nested_branch() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    assert!(editor.move_node(
        &mut root,
        &p("route.from.steps.2.to"),
        &p("route.from.steps.1.choice.when.0.steps.0.to")
    ));
    assert_eq!(step_ids(&root), vec!["log-a", "choice-1"]);
    let when = &root.child("from").unwrap().steps()[1].elements("when")[0];
    assert_eq!(when.steps()[0].id(), Some("to-c"));
    assert_eq!(when.steps().len(), 2);
}

#[test]
fn test_rejected_moves_leave_the_tree_untouched() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    let before = root.clone();
    assert!(!editor.move_node(&mut root, &p("route.from"), &p("route.from.steps.0.log")));
    assert!(!editor.move_node(
        &mut root,
        &p("route.from.steps.1.choice"),
        &p("route.from.steps.1.choice.when.0.steps.0.to")
    ));
    assert!(!editor.move_node(&mut root, &p("route.from.steps.0.log"), &p("rest.get.0")));
    assert_eq!(root, before);
}

#[test]
fn test_collected_paths_follow_document_order() {
    let root = route();
    let paths: Vec<String> = collect_paths(&root, &Path::root("route"), &EmptyCatalog)
        .iter()
        .map(Path::to_string)
        .collect();
    assert_eq!(
        paths,
        vec![
            "route",
            "route.from",
            "route.from.steps.0.log",
            "route.from.steps.1.choice",
            "route.from.steps.1.choice.when.0",
            "route.from.steps.1.choice.when.0.expression",
            "route.from.steps.1.choice.when.0.expression.simple",
            "route.from.steps.1.choice.when.0.steps.0.to",
            "route.from.steps.2.to",
        ]
    );
}

#[test]
fn test_removing_a_clause_keeps_its_sibling() {
    let mut root = Reader::new(&EmptyCatalog)
        .read_named(
            "route",
            &json!({
                "from": {
                    "uri": "timer:tick",
                    "steps": [{"choice": {
                        "when": [
                            {"id": "w0", "simple": "${header.a}"},
                            {"id": "w1", "simple": "${header.b}"}
                        ]
                    }}]
                }
            }),
        )
        .unwrap();
    let editor = StructuralEditor::new(&EmptyCatalog);
    assert!(editor.remove(&mut root, &p("route.from.steps.0.choice.when.0")).is_some());

    let choice = &root.child("from").unwrap().steps()[0];
    let whens = choice.elements("when");
    assert_eq!(whens.len(), 1);
    assert_eq!(whens[0].id(), Some("w1"));
}

#[test]
fn test_relative_inserts_never_replace_the_source() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    let before = root.clone();
    let cron = Element::new(StepKind::From).with_field("uri", json!("cron:x"));

    assert!(!editor.insert(&mut root, &p("route.from"), cron.clone(), InsertMode::Prepend));
    assert!(!editor.insert(&mut root, &p("route.from"), cron.clone(), InsertMode::Append));
    assert_eq!(root, before);

    assert!(editor.insert(&mut root, &p("route.from"), cron, InsertMode::Replace));
    assert_eq!(root.child("from").unwrap().uri(), Some("cron:x"));
    assert_eq!(step_ids(&root), vec!["log-a", "choice-1", "to-c"]);
}

#[test]
fn test_inserting_into_a_missing_list_is_ignored() {
    let mut root = route();
    let editor = StructuralEditor::new(&EmptyCatalog);
    let before = root.clone();
    let log = Element::new(StepKind::Log);

    assert!(!editor.insert(&mut root, &p("route.from.bogus.0.log"), log.clone(), InsertMode::Prepend));
    assert_eq!(root, before);

    let when_steps = "route.from.steps.1.choice.when.0.steps";
    assert!(editor.remove(&mut root, &p(&format!("{when_steps}.0"))).is_some());
    assert!(!editor.insert(&mut root, &p(&format!("{when_steps}.2.to")), log.clone(), InsertMode::Prepend));
    assert!(editor.insert(
        &mut root,
        &p(&format!("{when_steps}.0.placeholder")),
        log,
        InsertMode::Replace
    ));
    let when = &root.child("from").unwrap().steps()[1].elements("when")[0];
    assert_eq!(when.steps().len(), 1);
}
