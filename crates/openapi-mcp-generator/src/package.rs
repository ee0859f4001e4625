//! Packaging a generated client into a wheel.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use openapi_mcp_telemetry::log_client_packaged;

use crate::error::GeneratorError;
use crate::generator::ClientGenerator;
use crate::runner::{CommandRunner, CommandSpec};

impl<R: CommandRunner> ClientGenerator<R> {
    /// Build `client_dir` with `setup.py sdist bdist_wheel` and return the
    /// newest wheel under `dist/`.
    ///
    /// When `output_file` is given, the wheel is copied there (parent
    /// directories are created) and that path is returned instead.
    pub fn package_client(
        &self,
        client_dir: impl AsRef<Path>,
        output_file: Option<&Path>,
    ) -> Result<PathBuf, GeneratorError> {
        let client_dir = client_dir.as_ref();
        self.validate_generated_client(client_dir)?;

        let command = CommandSpec::new(&self.config().python)
            .args(["setup.py", "sdist", "bdist_wheel"])
            .current_dir(client_dir);

        let output = self.runner().run(&command)?;
        if !output.success {
            return Err(GeneratorError::PackagingFailed(output.stderr.trim().to_string()));
        }

        let wheel = newest_wheel(&client_dir.join("dist"))?.ok_or_else(|| {
            GeneratorError::PackagingFailed("no wheel file found after packaging".into())
        })?;

        let result = match output_file {
            Some(target) => {
                if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(&wheel, target)?;
                target.to_path_buf()
            }
            None => wheel,
        };

        log_client_packaged!(artifact = %result.display(), "packaged client");
        Ok(result)
    }
}

/// The most recently modified `*.whl` in `dist_dir`, if any.
fn newest_wheel(dist_dir: &Path) -> Result<Option<PathBuf>, GeneratorError> {
    if !dist_dir.is_dir() {
        return Ok(None);
    }

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in std::fs::read_dir(dist_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("whl") {
            continue;
        }
        let modified = std::fs::metadata(&path)?.modified()?;
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, path)| path))
}
