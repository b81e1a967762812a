use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(assert_cmd::cargo::cargo_bin!("routeforge"))
        .args(args)
        .output()
        .expect("should run successfully")
}

#[test]
fn test_top_level_help_lists_workflow_commands() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("WORKFLOW COMMANDS"));
    for command in ["fmt", "graph", "lint", "edit"] {
        assert!(stdout.contains(command), "missing {command}");
    }
    assert!(stdout.contains("--catalog"));
}

#[test]
fn test_version_flag_prints_crate_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains(routeforge::VERSION));
}

#[test]
fn test_graph_help_describes_formats() {
    let output = run(&["graph", "--help"]);
    assert!(output.status.success());
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--entity"));
    assert!(stdout.contains("Example"));
}

#[test]
fn test_edit_help_lists_actions() {
    let output = run(&["edit", "--help"]);
    assert!(output.status.success());
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    for action in ["add", "remove", "move", "set", "add-flow", "remove-flow"] {
        assert!(stdout.contains(action), "missing {action}");
    }
}

#[test]
fn test_missing_subcommand_is_a_usage_error() {
    let output = run(&[]);
    assert!(!output.status.success());
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("Usage") || stderr.contains("USAGE"));
}
