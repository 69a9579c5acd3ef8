use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn ape_cmd() -> Command {
    Command::cargo_bin("ape").unwrap()
}

fn write_constraints(tmp: &TempDir, json: &str) -> std::path::PathBuf {
    let path = tmp.path().join("feature_order.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_order_prints_total_order() {
    let tmp = TempDir::new().unwrap();
    let constraints = write_constraints(
        &tmp,
        r#"{
            "django_productline": {"first": true},
            "statics": {"last": true},
            "lessbuilder": {"after": ["django_productline"]}
        }"#,
    );
    let equation = tmp.path().join("product.equation");
    fs::write(&equation, "statics\n# comment\nlessbuilder\n\ndjango_productline\n").unwrap();

    ape_cmd()
        .args(["order", "--equation"])
        .arg(&equation)
        .arg("--constraints")
        .arg(&constraints)
        .assert()
        .success()
        .stdout("django_productline\nlessbuilder\nstatics\n");
}

#[test]
fn test_order_reports_multiple_first() {
    let tmp = TempDir::new().unwrap();
    let constraints = write_constraints(&tmp, r#"{"a": {"first": true}, "b": {"first": true}}"#);
    let equation = tmp.path().join("product.equation");
    fs::write(&equation, "a\nb\n").unwrap();

    ape_cmd()
        .args(["order", "-e"])
        .arg(&equation)
        .arg("-c")
        .arg(&constraints)
        .assert()
        .failure()
        .stderr(predicate::str::contains("first"));
}

#[test]
fn test_order_reports_cycle() {
    let tmp = TempDir::new().unwrap();
    let constraints = write_constraints(&tmp, r#"{"a": {"after": ["b"]}, "b": {"after": ["a"]}}"#);
    let equation = tmp.path().join("product.equation");
    fs::write(&equation, "a\nb\n").unwrap();

    ape_cmd()
        .args(["order", "-e"])
        .arg(&equation)
        .arg("-c")
        .arg(&constraints)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cycle"));
}

#[test]
fn test_order_missing_equation_fails() {
    let tmp = TempDir::new().unwrap();
    let constraints = write_constraints(&tmp, "{}");

    ape_cmd()
        .args(["order", "-e"])
        .arg(tmp.path().join("missing.equation"))
        .arg("-c")
        .arg(&constraints)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist"));
}

#[test]
fn test_graph_prints_dot() {
    let tmp = TempDir::new().unwrap();
    let constraints = write_constraints(&tmp, r#"{"a": {"first": true}, "b": {"after": ["a"]}}"#);

    ape_cmd()
        .args(["graph", "-c"])
        .arg(&constraints)
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph"))
        .stdout(predicate::str::contains("1 -> 0"));
}
