// Binary smoke tests against mocked metadata servers.
mod support;

use anyhow::{Context, Result};
use httpmock::MockServer;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

use support::{mock_descriptor, mock_releases, mock_types};

fn spring_version(server: &MockServer) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_spring-version"));
    cmd.arg("--boot-url")
        .arg(server.url("/releases"))
        .arg("--starter-url")
        .arg(server.base_url())
        .env("RUST_LOG", "off")
        .env("NO_PROXY", "127.0.0.1")
        .env("no_proxy", "127.0.0.1")
        .env_remove("GITHUB_OUTPUT");
    for var in ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(var);
    }
    cmd
}

fn run(mut cmd: Command) -> Result<Output> {
    cmd.output().context("failed to execute spring-version")
}

// Smoke-tests a full run with repeated -d flags printing to stdout.
#[test]
fn prints_boot_and_companion_versions() -> Result<()> {
    let server = MockServer::start();
    let releases = mock_releases(&server);
    let types = mock_types(&server);
    let descriptor = mock_descriptor(&server, "3.1.5", Some("cloud-starter,devtools,native"));

    let mut cmd = spring_version(&server);
    cmd.args(["-d", "cloud-starter,devtools", "-d", "native"]);
    let output = run(cmd)?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "spring-boot=3.1.5",
            "spring-cloud=4.8.4",
            "spring-cloud=2022.0.4",
            "vaadin=24.2.2",
        ]
    );
    releases.assert();
    types.assert();
    descriptor.assert();
    Ok(())
}

// Ensures whitespace-joined ranges reach the resolver intact through the flag.
#[test]
fn boot_version_flag_accepts_ranges() -> Result<()> {
    let server = MockServer::start();
    mock_releases(&server);
    mock_types(&server);
    let descriptor = mock_descriptor(&server, "2.7.17", None);

    let mut cmd = spring_version(&server);
    cmd.args(["-b", ">=2.0.0 <3.0.0"]);
    let output = run(cmd)?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("spring-boot=2.7.17"));
    descriptor.assert();
    Ok(())
}

// Error handling: an unknown type id exits 1 before any descriptor request and
// leaves stdout empty.
#[test]
fn unknown_type_exits_one_without_output() -> Result<()> {
    let server = MockServer::start();
    mock_releases(&server);
    mock_types(&server);
    let descriptor = mock_descriptor(&server, "3.1.5", None);

    let mut cmd = spring_version(&server);
    cmd.args(["--type-id", "ant-build"]);
    let output = run(cmd)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no result lines expected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ant-build"), "stderr was: {stderr}");
    assert_eq!(descriptor.hits(), 0);
    Ok(())
}

#[test]
fn github_output_appends_to_file() -> Result<()> {
    let server = MockServer::start();
    mock_releases(&server);
    mock_types(&server);
    mock_descriptor(&server, "3.1.5", None);
    let dir = TempDir::new()?;
    let out = dir.path().join("github_output");

    let mut cmd = spring_version(&server);
    cmd.args(["-o", "github", "-v"]).env("GITHUB_OUTPUT", &out);
    let output = run(cmd)?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&out)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.first(), Some(&"spring-boot=3.1.5"));
    assert!(lines.last().unwrap().starts_with("metadata={\"java.version\":\"17\""));
    Ok(())
}

// Error handling: `-o github` without GITHUB_OUTPUT must fail loudly.
#[test]
fn github_output_requires_env() -> Result<()> {
    let server = MockServer::start();
    mock_releases(&server);
    mock_types(&server);
    mock_descriptor(&server, "3.1.5", None);

    let mut cmd = spring_version(&server);
    cmd.args(["-o", "github"]);
    let output = run(cmd)?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GITHUB_OUTPUT"), "stderr was: {stderr}");
    Ok(())
}

// Ensures flag validation happens before any network traffic.
#[test]
fn invalid_flag_value_exits_one() -> Result<()> {
    let server = MockServer::start();
    let releases = mock_releases(&server);

    let mut cmd = spring_version(&server);
    cmd.args(["-o", "file"]);
    let output = run(cmd)?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(releases.hits(), 0);
    Ok(())
}
