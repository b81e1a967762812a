use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FLOWS: &str = r#"- route:
    id: r1
    from:
      uri: timer:tick
      steps:
        - log: "${body}"
        - to: direct:end
"#;

fn routeforge(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("routeforge"));
    cmd.current_dir(dir)
        .env_remove("ROUTEFORGE_CATALOG")
        .env_remove("ROUTEFORGE_ID_DIGITS")
        .env_remove("ROUTEFORGE_GRAPH_FORMAT")
        .env_remove("ROUTEFORGE_LOG_DIR")
        .env_remove("ROUTEFORGE_LOG_CONSOLE");
    cmd
}

fn workspace(flows: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("flows.yaml"), flows).unwrap();
    dir
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_fmt_prints_the_canonical_document() {
    let dir = workspace(FLOWS);
    routeforge(dir.path())
        .args(["fmt", "flows.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("message: ${body}"))
        .stdout(predicate::str::contains("uri: direct:end"));
    assert_eq!(fs::read_to_string(dir.path().join("flows.yaml")).unwrap(), FLOWS);
}

#[test]
fn test_fmt_write_is_idempotent() {
    let dir = workspace(FLOWS);
    routeforge(dir.path())
        .args(["fmt", "flows.yaml", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));
    let first = fs::read_to_string(dir.path().join("flows.yaml")).unwrap();
    routeforge(dir.path())
        .args(["fmt", "flows.yaml", "--write"])
        .assert()
        .success();
    let second = fs::read_to_string(dir.path().join("flows.yaml")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_graph_tree_is_the_default_format() {
    let dir = workspace(FLOWS);
    routeforge(dir.path())
        .args(["graph", "flows.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("route  route\n"))
        .stdout(predicate::str::contains("├── from [timer]  route.from"))
        .stdout(predicate::str::contains("└── to [direct]  route.from.steps.1.to"));
}

#[test]
fn test_graph_format_comes_from_config_file() {
    let dir = workspace(FLOWS);
    fs::write(dir.path().join("routeforge.toml"), "[output]\ngraph_format = \"dot\"\n").unwrap();
    routeforge(dir.path())
        .args(["graph", "flows.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"))
        .stdout(predicate::str::contains("style=dashed"));
}

#[test]
fn test_graph_json_output() {
    let dir = workspace(FLOWS);
    let stdout = stdout_of(routeforge(dir.path()).args(["graph", "flows.yaml", "--format", "json"]));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value[0]["id"], "r1");
    let nodes = value[0]["graph"]["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[1]["path"], "route.from");
    assert_eq!(nodes[1]["componentName"], "timer");
}

#[test]
fn test_graph_unknown_entity_fails() {
    let dir = workspace(FLOWS);
    routeforge(dir.path())
        .args(["graph", "flows.yaml", "--entity", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'nope'"));
}

#[test]
fn test_lint_clean_document() {
    let dir = workspace(FLOWS);
    routeforge(dir.path())
        .args(["lint", "flows.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found."));
}

#[test]
fn test_lint_errors_fail_the_command() {
    let dir = workspace("- route:\n    id: r1\n    from:\n      uri: timer:tick\n      steps:\n        - to: {}\n");
    routeforge(dir.path())
        .args(["lint", "flows.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("RF-LINT-002"))
        .stdout(predicate::str::contains("route.from.steps.0.to"))
        .stderr(predicate::str::contains("lint found 1 error(s)"));
}

#[test]
fn test_lint_json_output() {
    let dir = workspace("- route:\n    id: r1\n    from:\n      uri: timer:tick\n");
    let stdout = stdout_of(routeforge(dir.path()).args(["lint", "flows.yaml", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value[0]["entity"], "r1");
    assert_eq!(value[0]["code"], "RF-LINT-005");
    assert_eq!(value[0]["severity"], "info");
}

#[test]
fn test_edit_add_and_write_back() {
    let dir = workspace(FLOWS);
    routeforge(dir.path())
        .args([
            "edit",
            "flows.yaml",
            "--write",
            "add",
            "route.from.steps.0.log",
            "setHeader",
        ])
        .assert()
        .success();
    let text = fs::read_to_string(dir.path().join("flows.yaml")).unwrap();
    let value: serde_json::Value = serde_yaml::from_str(&text).unwrap();
    let steps = value[0]["route"]["from"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert!(steps[1].get("setHeader").is_some());
}

#[test]
fn test_edit_set_move_and_remove() {
    let dir = workspace(FLOWS);
    routeforge(dir.path())
        .args(["edit", "flows.yaml", "--write", "set", "route.from.steps.0.log.message", "hello"])
        .assert()
        .success();
    routeforge(dir.path())
        .args(["edit", "flows.yaml", "--write", "move", "route.from.steps.1.to", "route.from.steps.0.log"])
        .assert()
        .success();
    routeforge(dir.path())
        .args(["edit", "flows.yaml", "--write", "remove", "route.from.steps.0.to"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("flows.yaml")).unwrap();
    let value: serde_json::Value = serde_yaml::from_str(&text).unwrap();
    assert_eq!(
        value[0]["route"]["from"]["steps"],
        serde_json::json!([{"log": {"message": "hello"}}])
    );
}

#[test]
fn test_edit_without_effect_is_reported() {
    let dir = workspace(FLOWS);
    routeforge(dir.path())
        .args(["edit", "flows.yaml", "remove", "route.from.steps.7.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EDIT_NO_OP"));
}

#[test]
fn test_edit_creates_a_new_document() {
    let dir = TempDir::new().unwrap();
    routeforge(dir.path())
        .args(["edit", "new.yaml", "--write", "add-flow", "route"])
        .assert()
        .success();
    let text = fs::read_to_string(dir.path().join("new.yaml")).unwrap();
    let value: serde_json::Value = serde_yaml::from_str(&text).unwrap();
    let route = &value[0]["route"];
    assert!(route["id"].as_str().unwrap().starts_with("route-"));
    assert_eq!(route["from"]["uri"], "timer:template");

    routeforge(dir.path())
        .args(["edit", "new.yaml", "add-flow", "log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a flow kind"));
}

#[test]
fn test_edit_uses_the_configured_document_layout() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("routeforge.toml"),
        "[editor]\ndefault_document = \"integration\"\nid_digits = 6\n",
    )
    .unwrap();
    let stdout = stdout_of(routeforge(dir.path()).args(["edit", "new.yaml", "add-flow", "onCompletion"]));
    let value: serde_json::Value = serde_yaml::from_str(&stdout).unwrap();
    assert_eq!(value["kind"], "Integration");
    let id = value["spec"]["flows"][0]["onCompletion"]["id"].as_str().unwrap();
    assert_eq!(id.len(), "onCompletion-".len() + 6);
}

#[test]
fn test_unsupported_documents_are_rejected() {
    let dir = workspace("kind: Kamelet\nspec: {}\n");
    routeforge(dir.path())
        .args(["fmt", "flows.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UNSUPPORTED_DOCUMENT"));
}

#[test]
fn test_invalid_yaml_is_rejected() {
    let dir = workspace("- route: [\n");
    routeforge(dir.path())
        .args(["lint", "flows.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YAML_ERROR"));
}

#[test]
fn test_catalog_flag_feeds_untyped_slots() {
    let dir = workspace(
        "- route:\n    id: r1\n    from:\n      uri: timer:tick\n      steps:\n        - fanOut:\n            routes:\n              - simple: ${body}\n",
    );
    fs::write(
        dir.path().join("catalog.yaml"),
        "processors:\n  fanOut:\n    slots:\n      - name: routes\n        type: array-clause\n        kind: when\n",
    )
    .unwrap();
    routeforge(dir.path())
        .args(["graph", "flows.yaml", "--catalog", "catalog.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("when  route.from.steps.0.fanOut.routes.0"));
}
