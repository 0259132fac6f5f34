// tests/cli_orchestration_test.rs
use srcbump::cli::{run, RunArgs};
use srcbump::prompt::ScriptedChooser;
use srcbump::{BumpError, BumpPolicy, Executor};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MAIN_GO: &str = r#"package main

import "fmt"

const version = "1.0.5"

var VERSION = "2.0.9"

func main() {
	version := "local"
	fmt.Println(version, VERSION)
}
"#;

fn executor(policy: BumpPolicy) -> Executor {
    Executor::with_chooser(policy, Box::new(ScriptedChooser::without_terminal()))
}

fn minor() -> BumpPolicy {
    BumpPolicy {
        minor_delta: 1,
        ..BumpPolicy::default()
    }
}

fn write_go(dir: &Path, name: &str, source: &str) {
    fs::write(dir.join(name), source).unwrap();
}

fn run_to_string(args: &RunArgs, policy: BumpPolicy) -> Result<String, BumpError> {
    let mut out = Vec::new();
    run(args, &mut executor(policy), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_show_prints_json_and_leaves_files_alone() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "main.go", MAIN_GO);

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        show: true,
        ..RunArgs::default()
    };
    let result = run_to_string(&args, BumpPolicy::default());

    assert_eq!(
        result.unwrap(),
        "{\"VERSION\":\"2.0.9\",\"version\":\"1.0.5\"}\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("main.go")).unwrap(),
        MAIN_GO
    );
}

#[test]
fn test_show_raw() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "main.go", MAIN_GO);

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        show: true,
        raw: true,
        ..RunArgs::default()
    };
    let result = run_to_string(&args, BumpPolicy::default());

    assert_eq!(result.unwrap(), "1.0.5\n2.0.9\n");
}

#[test]
fn test_write_rewrites_in_place() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "main.go", MAIN_GO);

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        write: true,
        ..RunArgs::default()
    };
    let mut out = Vec::new();
    let summary = run(&args, &mut executor(minor()), &mut out).unwrap();

    assert!(out.is_empty());
    let rewritten = fs::read_to_string(dir.path().join("main.go")).unwrap();
    assert_eq!(
        rewritten,
        MAIN_GO
            .replace("\"1.0.5\"", "\"1.1.0\"")
            .replace("\"2.0.9\"", "\"2.1.0\"")
    );
    assert!(rewritten.contains("version := \"local\""));

    let versions = summary.get(&dir.path().join("main.go")).unwrap();
    assert_eq!(versions.get("version"), Some("1.1.0"));
    assert_eq!(versions.get("VERSION"), Some("2.1.0"));
}

#[test]
fn test_verbose_prints_versions_before_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("version.go");
    fs::write(&path, "package app\n\nvar version string\n").unwrap();

    let args = RunArgs {
        target: path,
        verbose: true,
        ..RunArgs::default()
    };
    let policy = BumpPolicy {
        patch_delta: 1,
        ..BumpPolicy::default()
    };
    let result = run_to_string(&args, policy);

    assert_eq!(
        result.unwrap(),
        "{\"version\":\"0.0.1\"}\npackage app\n\nvar version string = \"0.0.1\"\n"
    );
}

#[test]
fn test_directory_skips_units_without_matches() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "a.go", "package p\n\nvar name = \"a\"\n");
    write_go(dir.path(), "b.go", "package p\n\nconst Version = \"0.3.0\"\n");

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        write: true,
        ..RunArgs::default()
    };
    let summary = run(&args, &mut executor(minor()), &mut Vec::new()).unwrap();

    assert_eq!(summary.files.len(), 1);
    assert!(summary.get(&dir.path().join("b.go")).is_some());
    assert_eq!(
        fs::read_to_string(dir.path().join("b.go")).unwrap(),
        "package p\n\nconst Version = \"0.4.0\"\n"
    );
}

#[test]
fn test_no_match_anywhere() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "a.go", "package p\n\nvar name = \"a\"\n");

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        ..RunArgs::default()
    };
    let result = run_to_string(&args, minor());
    assert!(matches!(result.unwrap_err(), BumpError::NoMatchFound));
}

#[test]
fn test_failing_unit_does_not_stop_later_units() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "a.go", "package p\n\nvar version = \"1.0.0\"\n");
    write_go(dir.path(), "b.go", "package p\n\nvar version = \"v2\"\n");
    write_go(dir.path(), "c.go", "package p\n\nvar version = \"3.0.0\"\n");

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        write: true,
        ..RunArgs::default()
    };
    let err = run(&args, &mut executor(minor()), &mut Vec::new()).unwrap_err();

    assert!(matches!(err.root(), BumpError::Parse { .. }));
    let location = err.location().unwrap();
    assert!(location.file.ends_with("b.go"));
    assert_eq!((location.line, location.column), (3, 5));

    assert_eq!(
        fs::read_to_string(dir.path().join("a.go")).unwrap(),
        "package p\n\nvar version = \"1.1.0\"\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("b.go")).unwrap(),
        "package p\n\nvar version = \"v2\"\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("c.go")).unwrap(),
        "package p\n\nvar version = \"3.1.0\"\n"
    );
}

#[test]
fn test_failing_unit_prints_nothing() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "a.go", "package p\n\nvar version = \"bad\"\n");
    write_go(dir.path(), "b.go", "package p\n\nvar Version = \"1.0.0\"\n");

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        verbose: true,
        ..RunArgs::default()
    };
    let policy = BumpPolicy {
        patch_delta: 1,
        ..BumpPolicy::default()
    };
    let mut out = Vec::new();
    let err = run(&args, &mut executor(policy), &mut out).unwrap_err();

    let location = err.location().unwrap();
    assert!(location.file.ends_with("a.go"));
    assert_eq!((location.line, location.column), (3, 5));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"Version\":\"1.0.1\"}\npackage p\n\nvar Version = \"1.0.1\"\n"
    );
}

#[test]
fn test_exact_with_check_up() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "main.go", "package main\n\nvar version = \"1.2.3\"\n");

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        ..RunArgs::default()
    };
    let lower = BumpPolicy {
        exact: Some("1.2.2".to_string()),
        check_version_up: true,
        ..BumpPolicy::default()
    };
    let result = run_to_string(&args, lower);
    let err = result.unwrap_err();
    assert!(matches!(err.root(), BumpError::NotGreater { .. }));

    let higher = BumpPolicy {
        exact: Some("1.3.0".to_string()),
        check_version_up: true,
        ..BumpPolicy::default()
    };
    let result = run_to_string(&args, higher);
    assert_eq!(result.unwrap(), "package main\n\nvar version = \"1.3.0\"\n");
}

#[test]
fn test_prompt_picks_component() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "main.go", "package main\n\nvar version = \"1.2.3\"\n");

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        ..RunArgs::default()
    };
    let policy = BumpPolicy {
        prompt: true,
        ..BumpPolicy::default()
    };
    let mut executor = Executor::with_chooser(policy, Box::new(ScriptedChooser::new(vec![2])));
    let mut out = Vec::new();
    run(&args, &mut executor, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "package main\n\nvar version = \"2.0.0\"\n"
    );
}

#[test]
fn test_prompt_without_terminal_fails() {
    let dir = TempDir::new().unwrap();
    write_go(dir.path(), "main.go", "package main\n\nvar version = \"1.2.3\"\n");

    let args = RunArgs {
        target: dir.path().to_path_buf(),
        ..RunArgs::default()
    };
    let policy = BumpPolicy {
        prompt: true,
        ..BumpPolicy::default()
    };
    let result = run_to_string(&args, policy);
    assert!(matches!(result.unwrap_err(), BumpError::NoInteractiveTerminal));
}
