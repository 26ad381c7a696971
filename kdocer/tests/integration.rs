use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_kdocer")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn kotlin_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".kt").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const EMPTY_DOC: &str = "/**\n * \n */\nfun getUserName(id: Long): String = \"\"\n";

// -- phrase / generate --

#[test]
fn phrase_prints_one_line_per_identifier() {
    cmd()
        .args(["phrase", "getUserName", "MAX_VALUE", "URLParser", "id"])
        .assert()
        .success()
        .stdout("Get user name\nMax Value\nUrlparser\nId\n");
}

#[test]
fn generate_function() {
    cmd()
        .args(["generate", "function", "calculateTotal"])
        .args(["--param", "a", "--param", "b", "--returns"])
        .assert()
        .success()
        .stdout("* Calculate total\n* @param a\n* @param b\n* @return\n");
}

#[test]
fn generate_function_without_tags() {
    cmd()
        .args(["generate", "function", "reset"])
        .assert()
        .success()
        .stdout("* Reset\n");
}

#[test]
fn generate_type() {
    cmd()
        .args(["generate", "type", "Mapper", "--param", "T", "--param", "R"])
        .assert()
        .success()
        .stdout("* Mapper\n* @param T\n* @param R\n");
}

#[test]
fn generate_property_ignores_tags() {
    cmd()
        .args(["generate", "property", "userCount", "--param", "x", "--returns"])
        .assert()
        .success()
        .stdout("* User count\n");
}

// -- enter --

#[test]
fn enter_prints_document_with_skeleton() {
    let file = kotlin_file(EMPTY_DOC);
    cmd()
        .arg("enter")
        .arg(file.path())
        .args(["--line", "2", "--column", "4"])
        .assert()
        .success()
        .stdout(concat!(
            "/**\n * Get user name\n * @param id\n * @return\n */\n",
            "fun getUserName(id: Long): String = \"\"\n",
        ));
    // untouched without --in-place
    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), EMPTY_DOC);
}

#[test]
fn enter_json_report() {
    let file = kotlin_file(EMPTY_DOC);
    let assert = cmd()
        .arg("enter")
        .arg(file.path())
        .args(["--offset", "7", "--json"])
        .assert()
        .success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(report["applied"], true);
    assert_eq!(report["reason"], serde_json::Value::Null);
    assert_eq!(report["caret"], "/**\n * Get user name".len());
    assert_eq!(report["generated"], "* Get user name\n* @param id\n* @return");
}

#[test]
fn enter_in_place() {
    let file = kotlin_file("class A {\n    /**\n     *\n     */\n    val userCount = 0\n}\n");
    cmd()
        .arg("enter")
        .arg(file.path())
        .args(["--line", "3", "--column", "7", "-i"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(
        std::fs::read_to_string(file.path()).unwrap(),
        "class A {\n    /**\n     * User count\n     */\n    val userCount = 0\n}\n"
    );
}

#[test]
fn enter_on_filled_doc_passes_through() {
    let content = "/**\n * something\n * \n */\nfun f() {}\n";
    let file = kotlin_file(content);
    let assert = cmd()
        .arg("enter")
        .arg(file.path())
        .args(["--line", "3", "--column", "4", "--json"])
        .assert()
        .success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(report["applied"], false);
    assert_eq!(report["reason"], "doc comment is not empty");
    assert_eq!(report["text"], content);
}

#[test]
fn enter_without_smart_indent_passes_through() {
    let file = kotlin_file(EMPTY_DOC);
    cmd()
        .arg("enter")
        .arg(file.path())
        .args(["--offset", "7", "--no-smart-indent"])
        .assert()
        .success()
        .stdout(EMPTY_DOC);
}

#[test]
fn enter_ignores_non_kotlin_files() {
    let mut file = tempfile::Builder::new().suffix(".java").tempfile().unwrap();
    file.write_all(EMPTY_DOC.as_bytes()).unwrap();
    cmd()
        .arg("enter")
        .arg(file.path())
        .args(["--offset", "7", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not a Kotlin source file"));
}

#[test]
fn enter_requires_caret_position() {
    let file = kotlin_file(EMPTY_DOC);
    cmd()
        .arg("enter")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("either --offset or --line/--column"));
}

#[test]
fn enter_rejects_offset_past_end() {
    let file = kotlin_file(EMPTY_DOC);
    cmd()
        .arg("enter")
        .arg(file.path())
        .args(["--offset", "9999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid caret position"));
}

// -- fill --

#[test]
fn fill_skips_explicit_non_kotlin_files() {
    let dir = TempDir::new().unwrap();
    let java = dir.path().join("Main.java");
    std::fs::write(&java, EMPTY_DOC).unwrap();

    cmd()
        .arg("fill")
        .arg(&java)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("not a Kotlin source file"));
    assert_eq!(std::fs::read_to_string(&java).unwrap(), EMPTY_DOC);
}

#[test]
fn fill_rewrites_every_empty_doc() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("Calculator.kt");
    std::fs::copy(fixture_path("Calculator.kt"), &target).unwrap();

    cmd()
        .arg("fill")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("filled 4 doc comment(s)"));

    let output = std::fs::read_to_string(&target).unwrap();
    let expected = std::fs::read_to_string(fixture_path("Calculator.expected.kt")).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn fill_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("Calculator.kt");
    std::fs::copy(fixture_path("Calculator.expected.kt"), &target).unwrap();

    cmd().arg("fill").arg(&target).assert().success().stdout("");
    let expected = std::fs::read_to_string(fixture_path("Calculator.expected.kt")).unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), expected);
}

#[test]
fn fill_check_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("Calculator.kt");
    std::fs::copy(fixture_path("Calculator.kt"), &target).unwrap();

    cmd()
        .args(["fill", "--check"])
        .arg(format!("{}/*.kt", dir.path().display()))
        .assert()
        .failure()
        .stdout(predicate::str::contains("4 empty doc comment(s)"))
        .stderr(predicate::str::contains("1 file(s) have empty doc comments"));

    let original = std::fs::read_to_string(fixture_path("Calculator.kt")).unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), original);
}

// -- config --

#[test]
fn local_config_disables_smart_indent() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("kdocer.toml"), "smart_indent_on_enter = false\n").unwrap();
    let target = dir.path().join("Calculator.kt");
    std::fs::copy(fixture_path("Calculator.kt"), &target).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["fill", "--check", "Calculator.kt"])
        .assert()
        .success();
}

#[test]
fn explicit_config_extensions() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "extensions = [\"kotlin\"]\n").unwrap();
    let target = dir.path().join("Plain.kotlin");
    std::fs::write(&target, EMPTY_DOC).unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .arg("fill")
        .arg(dir.path())
        .assert()
        .success();
    assert!(std::fs::read_to_string(&target)
        .unwrap()
        .contains(" * Get user name\n"));
}

#[test]
fn missing_config_is_an_error() {
    cmd()
        .args(["--config", "/nonexistent/kdocer.toml", "phrase", "id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}
