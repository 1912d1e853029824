use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cfgcheck() -> Command {
    let mut cmd = Command::cargo_bin("cfgcheck").unwrap();
    cmd.env_remove("PY_DEBUG")
        .env_remove("CFGCHECK_REGISTRY")
        .env_remove("CFGCHECK_BASE_DIR")
        .env_remove("CFGCHECK_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Lay out one subdirectory per language and a registry file next to them
#[cfg(unix)]
fn samples(registry: &str, languages: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for id in languages {
        fs::create_dir_all(temp_dir.path().join(id)).unwrap();
    }
    fs::write(temp_dir.path().join("languages.yaml"), registry).unwrap();
    temp_dir
}

#[cfg(unix)]
fn run_in(dir: &Path) -> Command {
    let mut cmd = cfgcheck();
    cmd.env("CFGCHECK_BASE_DIR", dir)
        .env("CFGCHECK_REGISTRY", "languages.yaml");
    cmd
}

#[cfg(unix)]
const PASSING: &str = r#"
languages:
  - id: first
    name: First
    commands:
      - ["sh", "-c", "echo setup > setup.txt"]
      - ["sh", "-c", "printf 'building\nHello, world!\n'"]
  - id: second
    name: Second
    commands:
      - ["sh", "-c", "printf 'Hello, world! (3.12)\n'"]
    expect:
      starts_with_last_line: "Hello, world! ("
"#;

#[test]
fn test_version_flag() {
    cfgcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cfgcheck"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_languages() {
    cfgcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("jvm"))
        .stdout(predicate::str::contains("PY_DEBUG"));
}

#[test]
fn test_unknown_language_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    cfgcheck()
        .current_dir(temp_dir.path())
        .arg("cobol")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid choice: 'cobol'"))
        .stdout(predicate::str::contains("Checking").not());
}

#[test]
fn test_unreadable_registry_fails() {
    let temp_dir = TempDir::new().unwrap();
    cfgcheck()
        .env("CFGCHECK_BASE_DIR", temp_dir.path())
        .env("CFGCHECK_REGISTRY", "missing.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.yaml"));
}

#[test]
fn test_invalid_log_format_fails() {
    cfgcheck()
        .env("CFGCHECK_LOG_FORMAT", "xml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CFGCHECK_LOG_FORMAT"));
}

#[cfg(unix)]
#[test]
fn test_all_languages_pass() {
    let temp_dir = samples(PASSING, &["first", "second"]);

    run_in(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking First"))
        .stdout(predicate::str::contains("Checking Second"))
        .stdout(predicate::str::contains("Failed").not());

    // setup commands run inside the language directory
    assert!(temp_dir.path().join("first").join("setup.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_selected_language_only() {
    let temp_dir = samples(PASSING, &["first", "second"]);

    run_in(temp_dir.path())
        .arg("second")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking Second"))
        .stdout(predicate::str::contains("Checking First").not());

    assert!(!temp_dir.path().join("first").join("setup.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_mismatch_names_language() {
    let registry = r#"
languages:
  - id: wrong
    name: Wrong
    commands:
      - ["sh", "-c", "echo Goodbye"]
  - id: never
    name: Never
    commands:
      - ["sh", "-c", "touch ran.txt; echo 'Hello, world!'"]
"#;
    let temp_dir = samples(registry, &["wrong", "never"]);

    run_in(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unexpected result for Wrong (wrong)"))
        .stderr(predicate::str::contains("Goodbye"));

    assert!(!temp_dir.path().join("never").join("ran.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_command_reports_exit_status() {
    let registry = r#"
languages:
  - id: broken
    name: Broken
    commands:
      - ["sh", "-c", "echo compile error >&2; exit 3"]
      - ["sh", "-c", "echo 'Hello, world!'"]
"#;
    let temp_dir = samples(registry, &["broken"]);

    run_in(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("non-zero exit status 3"))
        .stderr(predicate::str::contains("compile error"));
}

#[cfg(unix)]
#[test]
fn test_debug_output_is_detailed() {
    let registry = r#"
languages:
  - id: wrong
    name: Wrong
    commands:
      - ["sh", "-c", "echo Goodbye"]
"#;
    let temp_dir = samples(registry, &["wrong"]);

    run_in(temp_dir.path())
        .env("PY_DEBUG", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed: MatchError"));
}

#[cfg(unix)]
#[test]
fn test_terse_failure_is_one_line() {
    let registry = r#"
languages:
  - id: wrong
    name: Wrong
    commands:
      - ["sh", "-c", "echo Goodbye"]
"#;
    let temp_dir = samples(registry, &["wrong"]);

    let assert = run_in(temp_dir.path()).assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(
        lines,
        vec!["Failed: Unexpected result for Wrong (wrong): Goodbye"]
    );
}

#[cfg(unix)]
#[test]
fn test_terse_process_failure_only_echoes_streams() {
    let registry = r#"
languages:
  - id: broken
    name: Broken
    commands:
      - ["sh", "-c", "echo compile error >&2; exit 3"]
"#;
    let temp_dir = samples(registry, &["broken"]);

    let assert = run_in(temp_dir.path()).assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2, "{stderr}");
    assert_eq!(lines[0], "compile error");
    assert!(lines[1].starts_with("Failed: "));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_environment_is_tolerated() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    cfgcheck()
        .current_dir(temp_dir.path())
        .env("CFGCHECK_JUNK", OsStr::from_bytes(b"\xff\xfe"))
        .env("CFGCHECK_LOG_FORMAT", OsStr::from_bytes(b"\xff"))
        .arg("cobol")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid choice: 'cobol'"));
}
