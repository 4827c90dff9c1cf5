//! CLI tests - run the `guardgen` binary against temporary projects.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

const TYPES: &str = r#"
export type Course = {
    title: string;
    price: number;
    description?: string;
    readonly code?: string;
};
"#;

fn guardgen(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("guardgen").unwrap();
    cmd.arg("--root").arg(root).env_remove("RUST_LOG");
    cmd
}

fn project(types: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("types.ts"), types).unwrap();
    dir
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn generate_writes_artifact() {
    let dir = project(TYPES);
    let output = guardgen(dir.path()).output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Generated "));

    let js = std::fs::read_to_string(dir.path().join("schema.js")).unwrap();
    assert!(js.starts_with("// THIS FILE IS AUTO-GENERATED from types.ts"));
    assert!(js.contains("export function validateCourse(data)"));
    assert!(js.contains("\"course\": [\"code\"],"));
}

#[test]
fn generate_is_idempotent() {
    let dir = project(TYPES);
    guardgen(dir.path()).arg("generate").assert().success();
    let first = std::fs::read(dir.path().join("schema.js")).unwrap();
    guardgen(dir.path()).arg("generate").assert().success();
    let second = std::fs::read(dir.path().join("schema.js")).unwrap();
    assert_eq!(first, second);

    guardgen(dir.path())
        .args(["generate", "--check"])
        .assert()
        .success();
}

#[test]
fn check_reports_stale_artifact() {
    let dir = project(TYPES);
    std::fs::write(dir.path().join("schema.js"), "stale").unwrap();
    guardgen(dir.path())
        .args(["generate", "--check"])
        .assert()
        .failure();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("schema.js")).unwrap(),
        "stale"
    );
}

#[test]
fn missing_source_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let output = guardgen(dir.path()).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
    assert!(!dir.path().join("schema.js").exists());
}

#[test]
fn no_exported_types_leaves_artifact_untouched() {
    let dir = project("type Course = { title: string };");
    std::fs::write(dir.path().join("schema.js"), "previous").unwrap();
    let output = guardgen(dir.path()).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no exported record types"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("schema.js")).unwrap(),
        "previous"
    );
}

#[test]
fn config_paths_are_used() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::create_dir_all(dir.path().join(".guardgen")).unwrap();
    std::fs::write(dir.path().join("src/models.ts"), TYPES).unwrap();
    std::fs::write(
        dir.path().join(".guardgen/config.toml"),
        "source = \"src/models.ts\"\noutput = \"gen/schema.js\"\n",
    )
    .unwrap();

    guardgen(dir.path()).assert().success();
    let js = std::fs::read_to_string(dir.path().join("gen/schema.js")).unwrap();
    assert!(js.contains("from models.ts"));
}

#[test]
fn json_backend() {
    let dir = project(TYPES);
    guardgen(dir.path())
        .args(["generate", "--backend", "json", "--output"])
        .arg(dir.path().join("schema.json"))
        .assert()
        .success();
    let dump: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("schema.json")).unwrap())
            .unwrap();
    assert_eq!(dump["guards"][0]["name"], "validateCourse");
}

#[test]
fn validate_reports_violations() {
    let dir = project(TYPES);
    let doc = dir.path().join("doc.json");

    std::fs::write(&doc, r#"{"title": "A", "category": "c", "price": 5}"#).unwrap();
    let output = guardgen(dir.path())
        .args(["validate", "Course"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["valid"], true);

    std::fs::write(&doc, r#"{"title": "A", "price": "5", "extra": 1}"#).unwrap();
    let output = guardgen(dir.path())
        .args(["validate", "course"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["valid"], false);
    let fields: Vec<_> = report["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, ["price", "category", ""]);
}

#[test]
fn validate_unknown_type() {
    let dir = project(TYPES);
    let doc = dir.path().join("doc.json");
    std::fs::write(&doc, "{}").unwrap();
    guardgen(dir.path())
        .args(["validate", "Teacher"])
        .arg(&doc)
        .assert()
        .failure();
}
