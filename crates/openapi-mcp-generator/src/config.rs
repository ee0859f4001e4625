//! Generator configuration.

use std::collections::BTreeMap;

/// Default generator executable.
pub const DEFAULT_GENERATOR_CLI: &str = "openapi-generator-cli";

/// Default package name of the generated client.
pub const DEFAULT_PACKAGE_NAME: &str = "openapi_client";

/// How the external generator and build tool are invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Generator executable (default: "openapi-generator-cli").
    pub generator_cli: String,

    /// Generator target passed as `-g` (default: "python").
    pub generator: String,

    /// Interpreter used to build the distribution (default: "python").
    pub python: String,

    /// `--additional-properties` entries. Sorted for stable command lines.
    pub additional_properties: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let additional_properties = [
            ("generateSourceCodeOnly", "true"),
            ("packageName", DEFAULT_PACKAGE_NAME),
            ("library", "urllib3"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            generator_cli: DEFAULT_GENERATOR_CLI.to_string(),
            generator: "python".to_string(),
            python: "python".to_string(),
            additional_properties,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generator executable.
    pub fn with_generator_cli(mut self, cli: impl Into<String>) -> Self {
        self.generator_cli = cli.into();
        self
    }

    /// Set the generator target.
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Set the build interpreter.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Set the package name of the generated client.
    pub fn with_package_name(self, name: impl Into<String>) -> Self {
        self.with_property("packageName", name)
    }

    /// Set the client HTTP library.
    pub fn with_library(self, library: impl Into<String>) -> Self {
        self.with_property("library", library)
    }

    /// Add or override one additional property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_properties.insert(key.into(), value.into());
        self
    }

    /// Add or override several additional properties; later entries win.
    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in properties {
            self.additional_properties.insert(k.into(), v.into());
        }
        self
    }

    /// The package name the generated client will use.
    pub fn package_name(&self) -> &str {
        self.additional_properties
            .get("packageName")
            .map(String::as_str)
            .unwrap_or(DEFAULT_PACKAGE_NAME)
    }

    /// `--additional-properties=key=value` arguments.
    pub fn property_args(&self) -> Vec<String> {
        self.additional_properties
            .iter()
            .map(|(k, v)| format!("--additional-properties={}={}", k, v))
            .collect()
    }
}
