use thiserror::Error;

/// Errors produced while generating or packaging a client.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Loading or reading the spec failed.
    #[error(transparent)]
    Spec(#[from] openapi_mcp_spec::SpecError),

    /// The external generator executable is missing or broken.
    #[error("{0} is not available; install it first: npm install @openapitools/openapi-generator-cli -g")]
    ToolUnavailable(String),

    /// Generation was requested before any spec was loaded.
    #[error("no specification loaded; load a spec first")]
    NoSpecification,

    /// The generator ran and reported failure.
    #[error("client generation failed: {0}")]
    GenerationFailed(String),

    /// The generated client directory lacks an expected file.
    #[error("invalid client: {0}")]
    InvalidClient(String),

    /// The build step failed or produced no artifact.
    #[error("client packaging failed: {0}")]
    PackagingFailed(String),

    /// An external program could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
