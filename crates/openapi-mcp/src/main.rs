//! openapi-mcp command-line interface.
//!
//! Validates and inspects OpenAPI specs, and generates client libraries
//! from them.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use openapi_mcp_generator::{ClientGenerator, GeneratorConfig, DEFAULT_GENERATOR_CLI};
use openapi_mcp_lib::report::{failure_json, SpecSummary};
use openapi_mcp_spec::SpecProcessor;
use openapi_mcp_telemetry::{LogFormat, TelemetryConfig};

#[derive(Parser, Debug)]
#[command(
    name = "openapi-mcp",
    about = "Validate OpenAPI specifications and generate API clients",
    version
)]
struct Cli {
    /// Log level filter (RUST_LOG takes precedence).
    #[arg(long, global = true, env = "OPENAPI_MCP_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log format (pretty or json).
    #[arg(long, global = true, env = "OPENAPI_MCP_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an OpenAPI specification file or URL.
    Validate {
        /// Path or http(s) URL of the spec (JSON or YAML).
        spec: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the endpoints (and optionally schemas) of a spec.
    Inspect {
        /// Path or http(s) URL of the spec (JSON or YAML).
        spec: String,

        /// Also list `components.schemas` names.
        #[arg(long)]
        schemas: bool,
    },

    /// Generate a client library from a spec.
    Generate {
        /// Path or http(s) URL of the spec (JSON or YAML).
        #[arg(short, long)]
        spec: String,

        /// Output directory for generated code.
        #[arg(short, long)]
        output: PathBuf,

        /// Package name of the generated client.
        #[arg(long)]
        package_name: Option<String>,

        /// HTTP library used by the generated client.
        #[arg(long)]
        library: Option<String>,

        /// Extra generator property (repeatable).
        #[arg(long = "property", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        properties: Vec<(String, String)>,

        /// Generator executable.
        #[arg(long, env = "OPENAPI_GENERATOR_CLI", default_value = DEFAULT_GENERATOR_CLI)]
        generator_cli: String,

        /// Build a wheel from the generated client.
        #[arg(long)]
        package: bool,

        /// Copy the built wheel to this path.
        #[arg(long, requires = "package")]
        package_output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Run the validate command.
fn run_validate(spec: &str, format: OutputFormat) -> ExitCode {
    let mut processor = SpecProcessor::new();
    let result = SpecSummary::load(&mut processor, spec);

    match (format, result) {
        (OutputFormat::Text, Ok(summary)) => {
            print!("{}", summary.render_validation());
            ExitCode::SUCCESS
        }
        (OutputFormat::Text, Err(e)) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
        (OutputFormat::Json, Ok(summary)) => print_json(&summary.to_validation_json()),
        (OutputFormat::Json, Err(e)) => {
            print_json(&failure_json(spec, &e));
            ExitCode::from(1)
        }
    }
}

fn print_json(value: &serde_json::Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to render JSON: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Run the inspect command.
fn run_inspect(spec: &str, schemas: bool) -> ExitCode {
    let mut processor = SpecProcessor::new();
    match SpecSummary::load(&mut processor, spec) {
        Ok(summary) => {
            print!("{}", summary.render_inspection(schemas));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

struct GenerateArgs {
    spec: String,
    output: PathBuf,
    config: GeneratorConfig,
    package: bool,
    package_output: Option<PathBuf>,
}

/// Run the generate command.
fn run_generate(args: GenerateArgs) -> ExitCode {
    let mut processor = SpecProcessor::new();
    if let Err(e) = processor.load(&args.spec) {
        eprintln!("error: {}", e);
        return ExitCode::from(1);
    }

    let generator = match ClientGenerator::system(args.config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    eprintln!(
        "generating client from {} to {}",
        args.spec,
        args.output.display()
    );

    let client_dir = match generator.generate_client(&processor, &args.output) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };
    println!("generated client in {}", client_dir.display());

    if args.package {
        match generator.package_client(&client_dir, args.package_output.as_deref()) {
            Ok(wheel) => println!("packaged client: {}", wheel.display()),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}

fn init_logging(level: &str, format: &str) {
    let log_format = LogFormat::parse(format).unwrap_or_else(|| {
        eprintln!("warning: unknown log format '{}', using pretty", format);
        LogFormat::Pretty
    });

    let config = TelemetryConfig::new()
        .with_log_level(level)
        .with_log_format(log_format);

    if let Err(e) = openapi_mcp_telemetry::init(&config) {
        eprintln!("warning: {}", e);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);
    tracing::debug!(command = ?cli.command, "starting");

    match cli.command {
        Commands::Validate { spec, format } => run_validate(&spec, format),
        Commands::Inspect { spec, schemas } => run_inspect(&spec, schemas),
        Commands::Generate {
            spec,
            output,
            package_name,
            library,
            properties,
            generator_cli,
            package,
            package_output,
        } => {
            let mut config = GeneratorConfig::new().with_generator_cli(generator_cli);
            if let Some(name) = package_name {
                config = config.with_package_name(name);
            }
            if let Some(library) = library {
                config = config.with_library(library);
            }
            let config = config.with_properties(properties);

            run_generate(GenerateArgs {
                spec,
                output,
                config,
                package,
                package_output,
            })
        }
    }
}
