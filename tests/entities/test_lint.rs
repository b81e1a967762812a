use routeforge::core::catalog::{CatalogLookup, EmptyCatalog, InMemoryCatalog};
use routeforge::core::lint::{LintRegistry, LintResult, LintSeverity};
use routeforge::core::transform::{parse_document, ParseOutcome};

fn lint_with(text: &str, catalog: &dyn CatalogLookup) -> Vec<LintResult> {
    let ParseOutcome::Supported(document) = parse_document(text, catalog).unwrap() else {
        panic!("expected a supported document");
    };
    let registry = LintRegistry::new();
    document
        .visual_entities()
        .flat_map(|entity| registry.run(entity.root(), &entity.root_path(), catalog))
        .collect()
}

fn lint(text: &str) -> Vec<LintResult> {
    lint_with(text, &EmptyCatalog)
}

fn summary(results: &[LintResult]) -> Vec<(String, String)> {
    results
        .iter()
        .map(|r| (r.code.clone(), r.location.clone().unwrap_or_default()))
        .collect()
}

#[test]
fn test_clean_route_has_no_findings() {
    let results = lint(
        r#"
- route:
    id: clean
    from:
      id: from-1
      uri: timer:tick
      steps:
        - log:
            id: log-1
            message: tick
"#,
    );
    assert!(results.is_empty(), "{results:?}");
}

#[test]
fn test_findings_are_sorted_by_severity_then_code() {
    let results = lint(
        r#"
- route:
    id: messy
    from:
      uri: timer:tick
      steps:
        - log:
            id: dup
            message: a
        - mystery-step: {}
        - filter:
            id: dup
            simple: ${body}
        - to: {}
"#,
    );
    assert_eq!(
        summary(&results),
        vec![
            ("RF-LINT-001".to_string(), "route.from.steps.2.filter".to_string()),
            ("RF-LINT-002".to_string(), "route.from.steps.3.to".to_string()),
            ("RF-LINT-004".to_string(), "route.from.steps.1.mystery-step".to_string()),
            ("RF-LINT-005".to_string(), "route.from.steps.2.filter.steps".to_string()),
        ]
    );
    assert_eq!(results[0].severity, LintSeverity::Error);
    assert_eq!(results[2].severity, LintSeverity::Warning);
    assert_eq!(results[3].severity, LintSeverity::Info);
    assert!(results[0].message.contains("'dup'"));
}

#[test]
fn test_blank_source_uri_is_reported_once() {
    let results = lint("- route:\n    id: r\n    from:\n      uri: \"  \"\n      steps:\n        - log: a\n");
    let codes: Vec<&str> = results.iter().map(|r| r.code.as_str()).collect();
    assert!(codes.contains(&"RF-LINT-003") || codes.contains(&"RF-LINT-002"));
    assert_eq!(
        results
            .iter()
            .filter(|r| r.severity == LintSeverity::Error)
            .count(),
        1
    );
}

#[test]
fn test_catalog_known_untyped_steps_are_informational() {
    let catalog = InMemoryCatalog::from_text(
        "processors:\n  audit:\n    title: Audit\n    required: [level]\n",
    )
    .unwrap();
    let text = "- route:\n    id: r\n    from:\n      uri: timer:a\n      steps:\n        - audit: {target: db}\n";
    let results = lint_with(text, &catalog);
    assert_eq!(
        summary(&results),
        vec![
            ("RF-LINT-002".to_string(), "route.from.steps.0.audit".to_string()),
            ("RF-LINT-004".to_string(), "route.from.steps.0.audit".to_string()),
        ]
    );
    assert_eq!(results[1].severity, LintSeverity::Info);
}

#[test]
fn test_results_serialize_for_machine_output() {
    let results = lint("- route:\n    id: r\n    from:\n      uri: timer:a\n      steps:\n        - to: {}\n");
    let value = serde_json::to_value(&results).unwrap();
    assert_eq!(value[0]["code"], "RF-LINT-002");
    assert_eq!(value[0]["severity"], "error");
    assert_eq!(value[0]["location"], "route.from.steps.0.to");
}
