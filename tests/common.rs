// tests/common.rs

use std::process::Command;

// Helper function to get the binary command
#[allow(dead_code)] // This is used by the CLI tests, but not the library tests.
pub fn geosite_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("geosite-files"));
    // Keep requests to the loopback address off any proxy configured in CI.
    for var in [
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

/// Arguments pointing the tool at a closed loopback port with fast failure.
#[allow(dead_code)]
pub fn unreachable_api_args() -> Vec<&'static str> {
    vec![
        "--repo-api",
        "http://127.0.0.1:9/repos/owner/repo",
        "--retries",
        "2",
        "--retry-delay-ms",
        "0",
        "--timeout",
        "2",
    ]
}
