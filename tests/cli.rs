use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const COUNTDOWN: &str = "// prints a greeting three times
आरम्भ
मान x = 3
यावत् (x > 0) {
  मुद्रय(\"नमस्ते\")
  x = x - 1
}
समाप्त
";

fn write_program(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).expect("write program");
    path
}

fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[test]
fn test_compile_prints_javascript() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "countdown.skt", COUNTDOWN);

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).arg("compile").arg(&path);

    cmd.assert().success().stdout(
        "let x = 3;\nwhile (x > 0) {\n  console.log(\"नमस्ते\");\n  x = x - 1;\n}\n",
    );
}

#[test]
fn test_compile_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "one.skt", "मुद्रय(सत्य)");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path())
        .arg("compile")
        .arg(&path)
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""program": "console.log(true);""#));
}

#[test]
fn test_compile_json_diagnostics() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "broken.skt", "{ {");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path())
        .args(["compile", "--format", "json"])
        .arg(&path);

    cmd.assert()
        .failure()
        .code(1)
        .stdout(
            predicate::str::contains(r#""kind": "structure""#)
                .and(predicate::str::contains(r#""column": 3"#)),
        );
}

#[test]
fn test_wrong_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "program.js", "मुद्रय(1)");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).arg("run").arg(&path);

    cmd.assert()
        .failure()
        .code(1)
        .stderr("Error: File must have .skt extension.\n");
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).args(["run", "missing.skt"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr("Error: File \"missing.skt\" not found.\n");
}

#[test]
fn test_compile_error_message_is_forwarded() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "loop.skt", "विराम");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).arg("run").arg(&path);

    cmd.assert().failure().code(1).stderr(
        "Error: loop control keyword found outside of loop at line 1, column 1 near \"विराम;\"\n",
    );
}

#[test]
fn test_marker_collapses_to_invalid_syntax() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "braces.skt", "}");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path())
        .env("SUTRA__RUNTIME__INVALID_SYNTAX_MARKER", "unmatched")
        .arg("run")
        .arg(&path);

    cmd.assert()
        .failure()
        .code(1)
        .stderr("Error: Invalid Sutra syntax.\n");
}

#[test]
fn test_config_file_changes_extension() {
    let dir = TempDir::new().unwrap();
    let config = write_program(&dir, "custom.toml", "[source]\nextension = \"sutra\"\n");
    let path = write_program(&dir, "program.sutra", "मुद्रय(शून्य)");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("compile")
        .arg(&path);

    cmd.assert().success().stdout("console.log(null);\n");
}

#[test]
fn test_project_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    write_program(&dir, "sutra.toml", "[compile]\nloop_tracking = \"counter\"\n");
    let path = write_program(
        &dir,
        "siblings.skt",
        "यावत् (x > 0) {\n  यदि (x == 2) {\n    x = 0\n  }\n  विराम\n}",
    );

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).arg("compile").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("loop control keyword found outside of loop"));
}

#[test]
fn test_run_countdown() {
    if !node_available() {
        eprintln!("skipping: node is not installed");
        return;
    }

    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "countdown.skt", COUNTDOWN);

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).arg("run").arg(&path);

    cmd.assert().success().stdout("नमस्ते\nनमस्ते\nनमस्ते\n");
}

#[test]
fn test_run_host_syntax_error() {
    if !node_available() {
        eprintln!("skipping: node is not installed");
        return;
    }

    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "broken.skt", "मुद्रय(1 +)");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).arg("run").arg(&path);

    cmd.assert()
        .failure()
        .code(1)
        .stderr("Error: Invalid Sutra syntax.\n");
}

#[test]
fn test_sandbox_hides_process() {
    if !node_available() {
        eprintln!("skipping: node is not installed");
        return;
    }

    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "escape.skt", "मुद्रय(typeof process)");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).arg("run").arg(&path);

    cmd.assert().success().stdout("undefined\n");
}

#[test]
fn test_file_errors_are_never_collapsed() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path())
        .args(["run", "Unexpected_missing.skt"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr("Error: File \"Unexpected_missing.skt\" not found.\n");
}

#[test]
fn test_loop_tracking_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let path = write_program(
        &dir,
        "siblings.skt",
        "यावत् (x > 0) {\n  यदि (x == 2) {\n    x = 0\n  }\n  विराम\n}",
    );

    let mut default_run = cargo_bin_cmd!("sutra");
    default_run.current_dir(dir.path()).arg("compile").arg(&path);
    default_run.assert().success();

    let mut counter_run = cargo_bin_cmd!("sutra");
    counter_run
        .current_dir(dir.path())
        .args(["--loop-tracking", "counter", "compile"])
        .arg(&path);
    counter_run
        .assert()
        .failure()
        .stderr(predicate::str::contains("loop control keyword found outside of loop"));
}

#[test]
fn test_run_rewrites_keywords_inside_strings() {
    if !node_available() {
        eprintln!("skipping: node is not installed");
        return;
    }

    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "literal.skt", "मुद्रय(\"सत्य\")");

    let mut cmd = cargo_bin_cmd!("sutra");
    cmd.current_dir(dir.path()).arg("run").arg(&path);

    cmd.assert().success().stdout("true\n");
}
