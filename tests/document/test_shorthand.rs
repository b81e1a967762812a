use routeforge::core::catalog::EmptyCatalog;
use routeforge::core::document::CamelDocument;
use routeforge::core::model::{Element, StepKind};
use routeforge::core::transform::{document_to_value, parse_document, ParseOutcome};
use serde_json::{json, Value};

fn parse(text: &str) -> CamelDocument {
    match parse_document(text, &EmptyCatalog).unwrap() {
        ParseOutcome::Supported(document) => document,
        ParseOutcome::Unsupported(reason) => panic!("unsupported document: {reason}"),
    }
}

fn route_with_steps(steps: &str) -> String {
    let mut text = String::from("- route:\n    id: r1\n    from:\n      uri: direct:start\n      steps:\n");
    for line in steps.lines().filter(|line| !line.trim().is_empty()) {
        text.push_str("        ");
        text.push_str(line.trim_start());
        text.push('\n');
    }
    text
}

fn steps_of(document: &CamelDocument) -> Vec<Element> {
    let route = document.entity("r1").unwrap();
    route.root().child("from").unwrap().steps().to_vec()
}

fn written_steps(document: &CamelDocument) -> Value {
    document_to_value(document, &EmptyCatalog)[0]["route"]["from"]["steps"].clone()
}

#[test]
fn test_scalar_bodies_expand_to_their_main_field() {
    let document = parse(&route_with_steps(
        r#"
- to: direct:next
- log: "${body}"
- removeHeaders: "Camel*"
- marshal: json
"#,
    ));
    let steps = steps_of(&document);
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0].uri(), Some("direct:next"));
    assert_eq!(steps[1].str_field("message"), Some("${body}"));
    assert_eq!(steps[2].str_field("pattern"), Some("Camel*"));
    assert!(steps[3].child("json").is_some());

    assert_eq!(
        written_steps(&document),
        json!([
            {"to": {"uri": "direct:next"}},
            {"log": {"message": "${body}"}},
            {"removeHeaders": {"pattern": "Camel*"}},
            {"marshal": {"json": {}}}
        ])
    );
}

#[test]
fn test_scalar_body_without_shorthand_is_dropped() {
    let document = parse(&route_with_steps(
        r#"
- choice: not-a-choice
- log: kept
"#,
    ));
    let steps = steps_of(&document);
    assert_eq!(steps.len(), 1);
    assert!(steps[0].kind.is(StepKind::Log));
}

#[test]
fn test_unknown_data_format_name_is_dropped() {
    let document = parse(&route_with_steps(
        r#"
- unmarshal: no-such-format
- unmarshal: csv
"#,
    ));
    let steps = steps_of(&document);
    assert_eq!(steps.len(), 1);
    assert!(steps[0].child("csv").is_some());
}

#[test]
fn test_inline_languages_fold_into_expressions() {
    let document = parse(&route_with_steps(
        r#"
- filter: {simple: "${header.ok}", steps: [{log: passed}]}
- setBody: {constant: done}
"#,
    ));
    let written = written_steps(&document);
    assert_eq!(
        written[0]["filter"]["expression"],
        json!({"simple": {"expression": "${header.ok}"}})
    );
    assert_eq!(written[0]["filter"]["steps"][0]["log"]["message"], "passed");
    assert_eq!(
        written[1]["setBody"]["expression"],
        json!({"constant": {"expression": "done"}})
    );
}

#[test]
fn test_empty_values_are_dropped_but_false_and_zero_survive() {
    let document = parse(&route_with_steps(
        r#"
- to: {uri: "direct:x", description: "", parameters: {a: "", b: false, c: 0}}
"#,
    ));
    let written = written_steps(&document);
    assert_eq!(
        written[0]["to"],
        json!({"uri": "direct:x", "parameters": {"b": false, "c": 0}})
    );
}

#[test]
fn test_unknown_step_kinds_are_kept_verbatim() {
    let document = parse(&route_with_steps(
        r#"
- custom-eip: {mode: fast}
- other-eip: raw-value
"#,
    ));
    let steps = steps_of(&document);
    assert_eq!(steps.len(), 2);
    assert!(steps[0].step_kind().is_none());

    let written = written_steps(&document);
    assert_eq!(written[0], json!({"custom-eip": {"mode": "fast"}}));
    assert_eq!(written[1], json!({"other-eip": "raw-value"}));
}
