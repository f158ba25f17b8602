//! Integration tests for the CLI.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temp dir with a directory bucket holding `templates/page.html`.
fn setup_bucket() -> TempDir {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("bucket").join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("page.html"), "<h1>Page</h1>").unwrap();
    temp
}

fn loader(temp: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("bucket-loader"));
    cmd.current_dir(temp);
    cmd.env_remove("BUCKET_LOADER_BUCKET")
        .env_remove("BUCKET_LOADER_CACHE_PATH")
        .env_remove("BUCKET_LOADER_TEMPLATE_FOLDER")
        .env_remove("BUCKET_LOADER_TTL")
        .env_remove("RUST_LOG");
    cmd.args(["--bucket", "bucket", "--cache-path", "cache"]);
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bucket-loader"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("template loading"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bucket-loader"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_get_fetches_then_hits_cache() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_bucket();

    loader(temp.path())
        .args(["get", "page.html"])
        .assert()
        .success()
        .stdout("<h1>Page</h1>")
        .stderr(predicate::str::contains("fetched: templates/page.html"));

    loader(temp.path())
        .args(["get", "page.html"])
        .assert()
        .success()
        .stdout("<h1>Page</h1>")
        .stderr(predicate::str::contains("cache hit"));

    assert!(temp
        .path()
        .join("cache")
        .join("templates")
        .join("page.html")
        .exists());
    Ok(())
}

#[test]
fn cli_get_missing_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_bucket();

    loader(temp.path())
        .args(["get", "missing.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Template not found: templates/missing.html",
        ));
    Ok(())
}

#[test]
fn cli_get_with_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_bucket();
    fs::write(temp.path().join("404.html"), "gone").unwrap();

    loader(temp.path())
        .args(["get", "missing.html", "--fallback", "404.html"])
        .assert()
        .success()
        .stdout("gone")
        .stderr(predicate::str::contains(
            "warning: templates/missing.html not found, served fallback",
        ));
    Ok(())
}

#[test]
fn cli_get_rejects_traversal() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_bucket();

    loader(temp.path())
        .args(["get", "../secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template name"));
    Ok(())
}

#[test]
fn cli_list_and_clear() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_bucket();
    loader(temp.path()).args(["get", "page.html"]).assert().success();

    loader(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("templates/page.html [fresh]"));

    loader(temp.path())
        .arg("clear")
        .assert()
        .success()
        .stderr(predicate::str::contains("Cleared 1 cached entries"));

    loader(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache is empty"));
    Ok(())
}

#[test]
fn cli_stats() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_bucket();
    loader(temp.path()).args(["get", "page.html"]).assert().success();

    loader(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total entries: 1"))
        .stdout(predicate::str::contains("Total size: 13 bytes"));
    Ok(())
}

#[test]
fn cli_reads_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_bucket();
    fs::write(
        temp.path().join("bucket-loader.yml"),
        "bucket: bucket\ncache_path: cache\nttl: 5m\n",
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin("bucket-loader"));
    cmd.current_dir(temp.path())
        .env_remove("BUCKET_LOADER_BUCKET")
        .env_remove("BUCKET_LOADER_TTL")
        .args(["get", "page.html"]);
    cmd.assert().success().stdout("<h1>Page</h1>");
    Ok(())
}

#[test]
fn cli_get_without_bucket_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();

    let mut cmd = Command::new(cargo_bin("bucket-loader"));
    cmd.current_dir(temp.path())
        .env_remove("BUCKET_LOADER_BUCKET")
        .args(["--cache-path", "cache", "get", "page.html"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("bucket is required"));
    Ok(())
}

#[test]
fn cli_rejects_ttl_above_max() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_bucket();

    loader(temp.path())
        .args(["--ttl", "9999999999d", "get", "page.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ttl must not exceed"));
    Ok(())
}
