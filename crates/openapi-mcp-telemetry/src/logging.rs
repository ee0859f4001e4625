//! Structured logging setup and standard event names.
//!
//! Logs go to stderr so that command output on stdout stays machine-readable.

use crate::{LogFormat, TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

/// Install the global subscriber: one stderr layer in the configured format.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.log_level)?;

    tracing_subscriber::registry()
        .with(output_layer(config.log_format).with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// `RUST_LOG` when it is set and parses, otherwise the configured level.
fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| TelemetryError::LoggingInit(format!("invalid log level '{}': {}", level, e)))
}

fn output_layer(format: LogFormat) -> BoxedLayer {
    match format {
        // One flat object per line; spans carry no data worth repeating.
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    }
}

/// Standard log event names.
pub mod events {
    /// A spec was loaded and passed structural validation.
    pub const SPEC_LOADED: &str = "spec_loaded";

    /// A parsed spec failed structural validation.
    pub const VALIDATION_FAILURE: &str = "validation_failure";

    /// The external generator produced a client.
    pub const CLIENT_GENERATED: &str = "client_generated";

    /// A generated client was built into a distributable artifact.
    pub const CLIENT_PACKAGED: &str = "client_packaged";
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:ident, $event:ident, $($field:tt)*) => {
        $crate::__tracing::$level!(
            event = $crate::logging::events::$event,
            $($field)*
        )
    };
}

/// `info` record tagged `event = "spec_loaded"`.
#[macro_export]
macro_rules! log_spec_loaded {
    ($($field:tt)*) => { $crate::__log_event!(info, SPEC_LOADED, $($field)*) };
}

/// `warn` record tagged `event = "validation_failure"`.
#[macro_export]
macro_rules! log_validation_failure {
    ($($field:tt)*) => { $crate::__log_event!(warn, VALIDATION_FAILURE, $($field)*) };
}

#[macro_export]
macro_rules! log_client_generated {
    ($($field:tt)*) => { $crate::__log_event!(info, CLIENT_GENERATED, $($field)*) };
}

#[macro_export]
macro_rules! log_client_packaged {
    ($($field:tt)*) => { $crate::__log_event!(info, CLIENT_PACKAGED, $($field)*) };
}
