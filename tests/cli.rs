//! Tests for the mdrelink binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a source tree with two linked pages
fn setup_site() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("index.md"), "[next](page.md)\n").unwrap();
    fs::write(temp_dir.path().join("page.md"), "    indented code\n").unwrap();
    temp_dir
}

fn mdrelink(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mdrelink"));
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path().join(".config"))
        .env("HOME", temp_dir.path());
    cmd
}

#[test]
fn test_build_destination_twice_does_not_nest() {
    let temp_dir = setup_site();

    for _ in 0..2 {
        mdrelink(&temp_dir)
            .args(["build", "-d", "public"])
            .assert()
            .success();
    }

    let public = temp_dir.path().join("public");
    let index = fs::read_to_string(public.join("index.html")).unwrap();
    assert!(index.contains("<a href=\"page.html\">next</a>"));

    let page = fs::read_to_string(public.join("page.html")).unwrap();
    assert!(page.contains("<pre><code>indented code\n</code></pre>"));

    assert!(!public.join("public").exists());
    let entries: Vec<_> = fs::read_dir(&public).unwrap().collect();
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_rewrite_from_stdin() {
    let temp_dir = TempDir::new().unwrap();

    mdrelink(&temp_dir)
        .arg("rewrite")
        .write_stdin("see [a](x.md) and [b](y.MD)")
        .assert()
        .success()
        .stdout("see [a](x.html) and [b](y.MD)");
}

#[test]
fn test_convert_file_to_stdout() {
    let temp_dir = setup_site();

    mdrelink(&temp_dir)
        .args(["convert", "index.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<a href=\"page.html\">next</a>"))
        .stdout(predicate::str::contains("<title>index</title>"));
}

#[test]
fn test_missing_source_fails() {
    let temp_dir = TempDir::new().unwrap();

    mdrelink(&temp_dir)
        .args(["build", "-s", "absent"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("source directory not found"));
}
