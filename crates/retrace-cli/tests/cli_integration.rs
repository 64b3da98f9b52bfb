//! Integration tests for the retrace binary.
//!
//! Each test writes its inputs into a temporary directory, runs the built
//! binary against them and inspects the files it produced.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn retrace(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_retrace"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to run retrace")
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("Failed to read JSON output");
    serde_json::from_str(&text).expect("Output is not valid JSON")
}

#[test]
fn test_edit_with_script_and_map() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::write(
        temp.path().join("in.js"),
        "function foo() {\n  return 42;\n}",
    )
    .unwrap();
    fs::write(
        temp.path().join("script.json"),
        r#"{"edits": [{"op": "replace", "start": 9, "end": 12, "text": "bar"}]}"#,
    )
    .unwrap();

    let output = retrace(
        temp.path(),
        &[
            "edit",
            "in.js",
            "--script",
            "script.json",
            "-o",
            "out.js",
            "--map",
            "out.js.map",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    assert_eq!(
        fs::read_to_string(temp.path().join("out.js")).unwrap(),
        "function bar() {\n  return 42;\n}"
    );

    let map = read_json(&temp.path().join("out.js.map"));
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "out.js");
    assert_eq!(map["sources"], serde_json::json!(["in.js"]));
    assert_eq!(map["mappings"], "AAAA,SAAA,GAAY;AACZ;AACA");
}

#[test]
fn test_edit_to_stdout_with_inline_map() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp.path().join("in.txt"), "hello").unwrap();

    let output = retrace(
        temp.path(),
        &["edit", "in.txt", "--inline-map", "--source", "greeting.txt"],
    );
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("hello\n//# sourceMappingURL=data:application/json;charset=utf-8;base64,"));
}

#[test]
fn test_edit_reports_overlapping_replace() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp.path().join("in.txt"), "abcdef").unwrap();
    fs::write(
        temp.path().join("script.json"),
        r#"{"edits": [
            {"op": "remove", "start": 1, "end": 4},
            {"op": "replace", "start": 2, "end": 5, "text": "x"}
        ]}"#,
    )
    .unwrap();

    let output = retrace(temp.path(), &["edit", "in.txt", "--script", "script.json"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to apply"), "{stderr}");
}

#[test]
fn test_bundle_manifest() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::create_dir(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/a.js"), "var a = 1;").unwrap();
    fs::write(
        temp.path().join("bundle.json"),
        r#"{
            "intro": "(function () {\n",
            "outro": "\n}());",
            "sources": [
                {"path": "src/a.js"},
                {"filename": "src/b.js", "content": "var b = 2;  ", "edits": [{"op": "trimEnd"}]}
            ]
        }"#,
    )
    .unwrap();

    let output = retrace(
        temp.path(),
        &[
            "bundle",
            "bundle.json",
            "-o",
            "bundle.js",
            "--map",
            "bundle.js.map",
            "--include-content",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    assert_eq!(
        fs::read_to_string(temp.path().join("bundle.js")).unwrap(),
        "(function () {\nvar a = 1;\nvar b = 2;\n}());"
    );

    let map = read_json(&temp.path().join("bundle.js.map"));
    assert_eq!(map["sources"], serde_json::json!(["src/a.js", "src/b.js"]));
    assert_eq!(
        map["sourcesContent"],
        serde_json::json!(["var a = 1;", "var b = 2;  "])
    );
    assert_eq!(map["mappings"], ";AAAA;ACAA;");
}
