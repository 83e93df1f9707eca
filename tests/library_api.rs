// tests/library_api.rs

mod common;

use geosite_files::errors::TransportFailure;
use geosite_files::tree::{ApiResponse, Endpoint, RetryPolicy};
use geosite_files::{execute, ConfigBuilder, Error, OutputFormat, TreeApi};
use std::cell::Cell;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

/// Serves `owner/repo` on branch `main` with the files under `rules/sets`.
struct FixtureApi {
    leaf_body: &'static str,
    transport_failures_before_branch: Cell<u32>,
}

impl FixtureApi {
    fn new(leaf_body: &'static str) -> Self {
        Self {
            leaf_body,
            transport_failures_before_branch: Cell::new(0),
        }
    }
}

impl TreeApi for FixtureApi {
    fn get(&self, endpoint: &Endpoint) -> Result<ApiResponse, TransportFailure> {
        let (status, body) = match endpoint {
            Endpoint::Branch(name) if name == "main" => {
                let left = self.transport_failures_before_branch.get();
                if left > 0 {
                    self.transport_failures_before_branch.set(left - 1);
                    return Err(TransportFailure("connection reset".to_string()));
                }
                (200, r#"{"name":"main","commit":{"sha":"commit0"}}"#)
            }
            Endpoint::Branch(_) => (404, r#"{"message":"Branch not found"}"#),
            Endpoint::Tree {
                sha,
                recursive: false,
            } if sha == "commit0" => (
                200,
                r#"{"tree":[
                    {"path":"README.md","type":"blob","sha":"r"},
                    {"path":"rules","type":"tree","sha":"rules0"}
                ]}"#,
            ),
            Endpoint::Tree {
                sha,
                recursive: false,
            } if sha == "rules0" => (200, r#"{"tree":[{"path":"sets","type":"tree","sha":"sets0"}]}"#),
            Endpoint::Tree {
                sha,
                recursive: true,
            } if sha == "sets0" => (200, self.leaf_body),
            Endpoint::Tree { .. } => (404, r#"{"message":"Not Found"}"#),
        };
        Ok(ApiResponse {
            status,
            body: body.to_string(),
        })
    }
}

const LEAF: &str = r#"{"tree":[
    {"path":"youtube.mrs","type":"blob","sha":"1"},
    {"path":"category-ads-all.yaml","type":"blob","sha":"2"},
    {"path":"nested","type":"tree","sha":"3"},
    {"path":"nested/apple@cn.list","type":"blob","sha":"4"},
    {"path":"google@!cn.yaml","type":"blob","sha":"5"},
    {"path":"LICENSE","type":"blob","sha":"6"}
],"truncated":false}"#;

fn builder_for(out_dir: &std::path::Path) -> ConfigBuilder {
    ConfigBuilder::new()
        .repo_api("https://api.example.test/repos/owner/repo")
        .branch("main")
        .segments(vec!["rules".to_string(), "sets".to_string()])
        .output_dir(out_dir.to_string_lossy().into_owned())
        .no_report(true)
}

#[test]
fn test_text_mode_writes_sorted_list_and_subsets() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let out_dir = temp.path().join("out");
    let config = builder_for(&out_dir).build()?;

    let api = FixtureApi::new(LEAF);
    let outcome = execute(&config, &api, None, &mut Vec::new())?;

    let expected = vec![
        "LICENSE",
        "category-ads-all.yaml",
        "google@!cn.yaml",
        "nested/apple@cn.list",
        "youtube.mrs",
    ];
    assert_eq!(outcome.files, expected);

    let primary = fs::read_to_string(out_dir.join("complete_geosite_files.txt"))?;
    assert_eq!(primary, format!("{}\n", expected.join("\n")));
    assert_eq!(
        fs::read_to_string(out_dir.join("yaml_files_complete.txt"))?,
        "category-ads-all.yaml\ngoogle@!cn.yaml\n"
    );
    assert_eq!(
        fs::read_to_string(out_dir.join("list_files_complete.txt"))?,
        "nested/apple@cn.list\n"
    );
    assert_eq!(
        fs::read_to_string(out_dir.join("mrs_files_complete.txt"))?,
        "youtube.mrs\n"
    );

    let categories = &outcome.report.categories;
    assert_eq!(categories.china, 1);
    assert_eq!(categories.non_china, 1);
    assert_eq!(categories.ads, 0);
    assert_eq!(categories.category, 1);
    assert_eq!(outcome.report.providers.get("youtube"), Some(&1));
    assert_eq!(outcome.report.providers.get("google"), Some(&1));
    Ok(())
}

#[test]
fn test_json_mode_writes_single_document() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let out_dir = temp.path().join("json");
    let config = builder_for(&out_dir).format(OutputFormat::Json).build()?;

    let outcome = execute(&config, &FixtureApi::new(LEAF), None, &mut Vec::new())?;
    assert_eq!(outcome.written, vec![out_dir.join("complete_geosite_files.json")]);

    let raw = fs::read_to_string(out_dir.join("complete_geosite_files.json"))?;
    let doc: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(doc["total_files"], 5);
    assert_eq!(doc["files"][0], "LICENSE");
    assert_eq!(doc["files"][4], "youtube.mrs");
    assert!(doc["generated_at"].as_str().is_some_and(|s| s.ends_with('Z')));
    assert_eq!(
        doc["source"],
        "https://api.example.test/repos/owner/repo@main:rules/sets"
    );

    // JSON mode never writes the text subsets.
    assert!(!out_dir.join("yaml_files_complete.txt").exists());
    Ok(())
}

#[test]
fn test_empty_leaf_writes_empty_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = builder_for(temp.path()).build()?;

    let outcome = execute(
        &config,
        &FixtureApi::new(r#"{"tree":[]}"#),
        None,
        &mut Vec::new(),
    )?;

    assert!(outcome.files.is_empty());
    assert_eq!(outcome.report.total, 0);
    assert_eq!(
        fs::read_to_string(temp.path().join("complete_geosite_files.txt"))?,
        ""
    );
    Ok(())
}

#[test]
fn test_unknown_branch_fails_without_writing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let out_dir = temp.path().join("out");
    let config = builder_for(&out_dir).branch("release").build()?;

    let result = execute(&config, &FixtureApi::new(LEAF), None, &mut Vec::new());

    match result {
        Err(Error::BranchNotFound { branch, status }) => {
            assert_eq!(branch, "release");
            assert_eq!(status, 404);
        }
        other => panic!("Expected BranchNotFound, got {:?}", other.map(|o| o.files)),
    }
    assert!(!out_dir.exists());
    Ok(())
}

#[test]
fn test_missing_segment_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = builder_for(temp.path())
        .segments(vec!["rules".to_string(), "missing".to_string()])
        .build()?;

    let err = execute(&config, &FixtureApi::new(LEAF), None, &mut Vec::new())
        .err()
        .ok_or("expected an error")?;

    assert!(matches!(err, Error::PathSegmentNotFound { ref segment, .. } if segment == "missing"));
    assert!(err.to_string().contains("'missing'"));
    Ok(())
}

#[test]
fn test_transient_transport_failure_is_retried() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let mut config = builder_for(temp.path()).build()?;
    config.retry = RetryPolicy::new(3, Duration::ZERO);

    let api = FixtureApi::new(LEAF);
    api.transport_failures_before_branch.set(2);

    let outcome = execute(&config, &api, None, &mut Vec::new())?;
    assert_eq!(outcome.files.len(), 5);
    Ok(())
}

#[test]
fn test_report_is_printed_after_saving() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = builder_for(temp.path()).no_report(false).preview(2).build()?;

    let mut out = Vec::new();
    execute(&config, &FixtureApi::new(LEAF), None, &mut out)?;
    let printed = String::from_utf8(out)?;

    assert!(printed.contains("Total files: 5"));
    assert!(printed.contains("... and 3 more"));
    assert!(printed.contains("Saved: "));
    assert!(printed.contains("complete_geosite_files.txt"));
    Ok(())
}
