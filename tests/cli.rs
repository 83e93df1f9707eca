// tests/cli.rs

mod common;

use assert_cmd::prelude::*;
use common::{geosite_cmd, unreachable_api_args};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_lists_options() -> Result<(), Box<dyn std::error::Error>> {
    geosite_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--from-url"));
    Ok(())
}

#[test]
fn test_version_flag() -> Result<(), Box<dyn std::error::Error>> {
    geosite_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn test_invalid_format_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    geosite_cmd()
        .args(["--format", "csv"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'csv'"));
    Ok(())
}

#[test]
fn test_from_url_conflicts_with_branch() -> Result<(), Box<dyn std::error::Error>> {
    geosite_cmd()
        .args([
            "--from-url",
            "https://github.com/owner/repo/tree/main/dir",
            "--branch",
            "meta",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
    Ok(())
}

#[test]
fn test_invalid_from_url_fails_before_network() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let out_dir = temp.path().join("out");

    geosite_cmd()
        .args(["--from-url", "https://example.com/not/a/github/url"])
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a GitHub folder URL"));

    assert!(!out_dir.exists());
    Ok(())
}

#[test]
fn test_output_filename_with_separator_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    geosite_cmd()
        .args(["--output", "nested/list.txt"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must be a file name"));
    Ok(())
}

#[test]
fn test_zero_retries_rejected() -> Result<(), Box<dyn std::error::Error>> {
    geosite_cmd()
        .args(["--retries", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--retries must be at least 1"));
    Ok(())
}

#[test]
fn test_unreachable_api_exits_nonzero_without_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let out_dir = temp.path().join("out");

    geosite_cmd()
        .args(unreachable_api_args())
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    // Resolution failed, so nothing was persisted, not even the directory.
    assert!(!out_dir.exists());
    Ok(())
}

#[test]
fn test_unreachable_api_json_mode_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    geosite_cmd()
        .args(unreachable_api_args())
        .args(["--format", "json", "--output-dir", "listing"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1);

    assert!(!temp.path().join("listing").exists());
    Ok(())
}
