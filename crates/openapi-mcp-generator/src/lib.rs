//! Client generation and packaging around a loaded OpenAPI spec.
//!
//! Generation delegates to `openapi-generator-cli`; packaging delegates to
//! the generated project's `setup.py`. Both go through a [`CommandRunner`]
//! so no real process is needed in tests.

pub mod config;
pub mod error;
pub mod generator;
pub mod package;
pub mod runner;

pub use config::{GeneratorConfig, DEFAULT_GENERATOR_CLI, DEFAULT_PACKAGE_NAME};
pub use error::GeneratorError;
pub use generator::ClientGenerator;
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
