//! Integration tests for openapi-mcp.
//!
//! `cli` drives the `openapi-mcp` binary as a subprocess; `remote` loads
//! specs from a mock HTTP server through the real fetcher.

use std::path::PathBuf;

#[cfg(test)]
mod cli;
#[cfg(test)]
mod remote;

/// Absolute path to the shared test fixtures directory.
pub fn fixtures() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/openapi-mcp-test
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .nth(2)
        .map(|root| root.join("tests/fixtures"))
        .unwrap_or_else(|| manifest.join("tests/fixtures"))
}

/// Path of a named fixture file.
pub fn fixture(name: &str) -> PathBuf {
    fixtures().join(name)
}
