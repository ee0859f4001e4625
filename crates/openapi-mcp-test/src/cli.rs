//! CLI regression tests for the `openapi-mcp` binary.
//!
//! These tests invoke the binary as a subprocess to catch regressions in flag
//! names, exit codes, and output formats.
//!
//! Run with: `cargo test -p openapi-mcp-test`
//! Requires the `openapi-mcp` binary to be built first (`cargo build -p openapi-mcp`).

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

use crate::fixture;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns an assert_cmd Command wrapping the `openapi-mcp` binary.
fn openapi_mcp() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("openapi-mcp")
        .expect("openapi-mcp binary not found, run `cargo build -p openapi-mcp` first");
    cmd.env_remove("OPENAPI_MCP_LOG_LEVEL")
        .env_remove("OPENAPI_MCP_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ---------------------------------------------------------------------------
// openapi-mcp validate
// ---------------------------------------------------------------------------

#[test]
fn validate_yaml_spec_exits_zero() {
    openapi_mcp()
        .arg("validate")
        .arg(fixture("petstore.yaml"))
        .assert()
        .success()
        .stdout(contains("Valid OpenAPI specification"))
        .stdout(contains("Petstore API"))
        .stdout(contains("endpoints: 3"));
}

#[test]
fn validate_json_spec_exits_zero() {
    openapi_mcp()
        .arg("validate")
        .arg(fixture("petstore.json"))
        .assert()
        .success()
        .stdout(contains("openapi:   3.1.0"));
}

#[test]
fn validate_parse_error_exits_one() {
    openapi_mcp()
        .arg("validate")
        .arg(fixture("invalid-parse-error.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("invalid YAML format"));
}

#[test]
fn validate_unsupported_version_exits_one() {
    openapi_mcp()
        .arg("validate")
        .arg(fixture("invalid-version.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unsupported OpenAPI version: 2.0.0"));
}

#[test]
fn validate_missing_paths_names_the_field() {
    openapi_mcp()
        .arg("validate")
        .arg(fixture("missing-paths.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("missing required field 'paths'"));
}

#[test]
fn validate_missing_file_exits_one() {
    openapi_mcp()
        .args(["validate", "/nonexistent/openapi.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("not found"));
}

#[test]
fn validate_unknown_extension_exits_one() {
    openapi_mcp()
        .arg("validate")
        .arg(fixture("petstore.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unsupported file format: '.txt'"));
}

#[test]
fn validate_json_format_reports_success() {
    let output = openapi_mcp()
        .arg("validate")
        .arg(fixture("petstore.yaml"))
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["title"], "Petstore API");
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["endpoints"], 3);
}

#[test]
fn validate_json_format_reports_failure() {
    let output = openapi_mcp()
        .arg("validate")
        .arg(fixture("invalid-version.yaml"))
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = json_stdout(&output);
    assert_eq!(json["valid"], false);
    assert_eq!(json["kind"], "validation");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("unsupported OpenAPI version"));
}

#[test]
fn validate_requires_spec_argument() {
    openapi_mcp().arg("validate").assert().failure().code(2);
}

#[test]
fn unknown_output_format_is_a_usage_error() {
    openapi_mcp()
        .arg("validate")
        .arg(fixture("petstore.yaml"))
        .args(["--format", "xml"])
        .assert()
        .failure()
        .code(2);
}

// ---------------------------------------------------------------------------
// openapi-mcp inspect
// ---------------------------------------------------------------------------

#[test]
fn inspect_lists_endpoints_in_document_order() {
    let output = openapi_mcp()
        .arg("inspect")
        .arg(fixture("petstore.yaml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout
        .lines()
        .filter(|l| l.starts_with("  "))
        .map(str::trim)
        .collect();
    assert_eq!(
        lines,
        vec![
            "GET /pets - List all pets",
            "POST /pets - Create a pet",
            "GET /pets/{petId} - Info for a specific pet",
        ]
    );
    assert!(!stdout.contains("schema(s)"));
}

#[test]
fn inspect_with_schemas() {
    openapi_mcp()
        .arg("inspect")
        .arg(fixture("petstore.yaml"))
        .arg("--schemas")
        .assert()
        .success()
        .stdout(contains("2 schema(s):"))
        .stdout(contains("  Pet\n"))
        .stdout(contains("  NewPet\n"));
}

#[test]
fn inspect_invalid_spec_exits_one() {
    openapi_mcp()
        .arg("inspect")
        .arg(fixture("missing-paths.yaml"))
        .assert()
        .failure()
        .code(1);
}

// ---------------------------------------------------------------------------
// openapi-mcp generate
// ---------------------------------------------------------------------------

#[test]
fn generate_without_generator_cli_exits_one() {
    let tmp = TempDir::new().unwrap();
    openapi_mcp()
        .arg("generate")
        .arg("--spec")
        .arg(fixture("petstore.yaml"))
        .arg("--output")
        .arg(tmp.path().join("client"))
        .args(["--generator-cli", "/nonexistent/openapi-generator-cli"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("npm install"));
}

#[test]
fn generate_invalid_spec_fails_before_generator_check() {
    let tmp = TempDir::new().unwrap();
    openapi_mcp()
        .arg("generate")
        .arg("--spec")
        .arg(fixture("invalid-version.yaml"))
        .arg("--output")
        .arg(tmp.path().join("client"))
        .args(["--generator-cli", "/nonexistent/openapi-generator-cli"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unsupported OpenAPI version"));
}

#[test]
fn generate_rejects_malformed_property() {
    let tmp = TempDir::new().unwrap();
    openapi_mcp()
        .arg("generate")
        .arg("--spec")
        .arg(fixture("petstore.yaml"))
        .arg("--output")
        .arg(tmp.path())
        .args(["--property", "novalue"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn package_output_requires_package() {
    let tmp = TempDir::new().unwrap();
    openapi_mcp()
        .arg("generate")
        .arg("--spec")
        .arg(fixture("petstore.yaml"))
        .arg("--output")
        .arg(tmp.path())
        .arg("--package-output")
        .arg(tmp.path().join("client.whl"))
        .assert()
        .failure()
        .code(2);
}

// ---------------------------------------------------------------------------
// General
// ---------------------------------------------------------------------------

#[test]
fn help_lists_subcommands() {
    openapi_mcp()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("validate"))
        .stdout(contains("inspect"))
        .stdout(contains("generate"));
}

#[test]
fn json_log_format_is_accepted() {
    openapi_mcp()
        .args(["--log-format", "json", "--log-level", "debug", "validate"])
        .arg(fixture("petstore.yaml"))
        .assert()
        .success();
}
