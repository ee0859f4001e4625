//! Client generation through `openapi-generator-cli`.

use std::path::{Path, PathBuf};

use openapi_mcp_spec::{SpecDocument, SpecProcessor};
use openapi_mcp_telemetry::log_client_generated;
use tempfile::TempDir;

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::runner::{CommandRunner, CommandSpec, SystemRunner};

/// File name of the spec handed to the generator.
const SPEC_FILE_NAME: &str = "openapi.json";

/// Drives an external generator to turn a loaded spec into a client library.
#[derive(Debug)]
pub struct ClientGenerator<R = SystemRunner> {
    runner: R,
    config: GeneratorConfig,
}

impl ClientGenerator<SystemRunner> {
    /// A generator that spawns real processes.
    pub fn system(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        Self::new(SystemRunner, config)
    }
}

impl<R: CommandRunner> ClientGenerator<R> {
    /// Create a generator, failing if the generator executable does not answer
    /// `version`.
    pub fn new(runner: R, config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let generator = Self { runner, config };
        generator.check_generator_cli()?;
        Ok(generator)
    }

    fn check_generator_cli(&self) -> Result<(), GeneratorError> {
        let cli = &self.config.generator_cli;
        match self.runner.run(&CommandSpec::new(cli).arg("version")) {
            Ok(output) if output.success => {
                tracing::debug!(generator = %cli, version = output.stdout.trim(), "generator available");
                Ok(())
            }
            Ok(_) | Err(_) => Err(GeneratorError::ToolUnavailable(cli.clone())),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub(crate) fn runner(&self) -> &R {
        &self.runner
    }

    /// Generate a client from the processor's current document.
    pub fn generate_client(
        &self,
        processor: &SpecProcessor,
        output_dir: impl AsRef<Path>,
    ) -> Result<PathBuf, GeneratorError> {
        let doc = processor
            .document()
            .ok_or(GeneratorError::NoSpecification)?;
        self.generate_from_document(doc, output_dir)
    }

    /// Generate a client from `doc` into `output_dir`, creating it if needed.
    ///
    /// The document is written to a temporary `openapi.json` that lives only
    /// for the duration of the generator run.
    pub fn generate_from_document(
        &self,
        doc: &SpecDocument,
        output_dir: impl AsRef<Path>,
    ) -> Result<PathBuf, GeneratorError> {
        let output_dir = output_dir.as_ref().to_path_buf();

        let temp_dir = TempDir::new()?;
        let spec_path = temp_dir.path().join(SPEC_FILE_NAME);
        std::fs::write(&spec_path, doc.to_json_string()?)?;

        std::fs::create_dir_all(&output_dir)?;

        let command = CommandSpec::new(&self.config.generator_cli)
            .arg("generate")
            .arg("-i")
            .arg(spec_path.to_string_lossy())
            .arg("-g")
            .arg(&self.config.generator)
            .arg("-o")
            .arg(output_dir.to_string_lossy())
            .args(self.config.property_args());

        let output = self.runner.run(&command)?;
        if !output.success {
            return Err(GeneratorError::GenerationFailed(output.stderr.trim().to_string()));
        }

        log_client_generated!(
            title = doc.title(),
            generator = %self.config.generator,
            output = %output_dir.display(),
            "generated client"
        );

        Ok(output_dir)
    }

    /// Check that `client_dir` has the layout of a generated client:
    /// `<package>/__init__.py`, `<package>/api_client.py`, and `setup.py`.
    pub fn validate_generated_client(
        &self,
        client_dir: impl AsRef<Path>,
    ) -> Result<(), GeneratorError> {
        let client_dir = client_dir.as_ref();
        if !client_dir.is_dir() {
            return Err(GeneratorError::InvalidClient(format!(
                "client directory does not exist: {}",
                client_dir.display()
            )));
        }

        let package = self.config.package_name();
        let required = [
            format!("{}/__init__.py", package),
            format!("{}/api_client.py", package),
            "setup.py".to_string(),
        ];

        if let Some(missing) = required.iter().find(|rel| !client_dir.join(rel).exists()) {
            return Err(GeneratorError::InvalidClient(format!("missing {}", missing)));
        }

        Ok(())
    }
}
