//! openapi-mcp command-line support library.
//!
//! This library exposes internal modules for testing purposes.
//! The main entry point is the `openapi-mcp` binary.

pub mod report;
