// crates/botoforge-cli/src/main.rs
// ============================================================================
// Module: Boto Forge CLI
// Description: Command-line entry point for serving and one-shot generation.
// Purpose: Drive the narrowing pipeline from the terminal with stable exits.
// Dependencies: botoforge-config, botoforge-providers, botoforge-server, clap
// ============================================================================

//! ## Overview
//! The `botoforge` binary exposes three subcommands. `serve` starts the HTTP
//! server on a multi-thread runtime, `generate` runs the pipeline once and
//! writes the generated code to stdout or a file, and `services` lists the
//! corpus service names as a sanity check. Generation exits 0 on success, 1
//! when no relevant services are found, and 2 on any error.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use botoforge_config::BotoForgeConfig;
use botoforge_config::CompletionConfig;
use botoforge_core::DocumentationStore;
use botoforge_core::Pipeline;
use botoforge_core::PipelineOutcome;
use botoforge_core::ServiceCatalog;
use botoforge_providers::GeminiCompletionConfig;
use botoforge_providers::GeminiCompletionService;
use botoforge_server::BotoForgeServer;
use botoforge_store_json::JsonDocumentationStore;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code returned when a query matches no services.
const EXIT_NO_SERVICES: u8 = 1;
/// Exit code returned for configuration or runtime errors.
const EXIT_ERROR: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "botoforge", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Boto Forge HTTP server.
    Serve(ServeCommand),
    /// Generate code for a single query.
    Generate(GenerateCommand),
    /// List the service names in the documentation corpus.
    Services(ServicesCommand),
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to botoforge.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `generate` command.
#[derive(Args, Debug)]
struct GenerateCommand {
    /// Natural-language description of the AWS task.
    #[arg(long, value_name = "QUERY")]
    query: String,
    /// Optional config file path (defaults to botoforge.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Optional output file for the generated code (defaults to stdout).
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

/// Configuration for the `services` command.
#[derive(Args, Debug)]
struct ServicesCommand {
    /// Optional config file path (defaults to botoforge.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("botoforge {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Generate(command) => command_generate(command).await,
        Commands::Services(command) => command_services(&command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    // The blocking HTTP client must be constructed off the async runtime.
    let server = tokio::task::spawn_blocking(move || {
        let store = build_store(&config)?;
        let completion = build_completion(&config.completion)?;
        BotoForgeServer::new(&config, store, completion)
            .map_err(|err| CliError::new(format!("server init failed: {err}")))
    })
    .await
    .map_err(|err| CliError::new(format!("server init failed: worker join failed: {err}")))??;

    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Executes the `generate` command.
async fn command_generate(command: GenerateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let query = command.query;
    let outcome = tokio::task::spawn_blocking(move || {
        let store = build_store(&config)?;
        let completion = build_completion(&config.completion)?;
        let pipeline = Pipeline::new(store, completion);
        pipeline.run(&query).map_err(|err| CliError::new(format!("generate failed: {err}")))
    })
    .await
    .map_err(|err| CliError::new(format!("generate failed: worker join failed: {err}")))??;

    match outcome {
        PipelineOutcome::Completed(result) => {
            write_generated_code(&result.code, command.out.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        PipelineOutcome::NoServices => {
            write_stderr_line("No relevant AWS services found for your query")
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            Ok(ExitCode::from(EXIT_NO_SERVICES))
        }
    }
}

/// Writes generated code to the requested output destination.
fn write_generated_code(code: &str, out: Option<&Path>) -> CliResult<()> {
    match out {
        Some(path) => fs::write(path, code.as_bytes()).map_err(|err| {
            CliError::new(format!("failed to write '{}': {err}", path.display()))
        }),
        None => write_stdout_line(code).map_err(|err| CliError::new(output_error("stdout", &err))),
    }
}

// ============================================================================
// SECTION: Services Command
// ============================================================================

/// Executes the `services` command.
fn command_services(command: &ServicesCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let store = build_store(&config)?;
    let catalog =
        store.load().map_err(|err| CliError::new(format!("services failed: {err}")))?;
    for name in service_names(&catalog) {
        write_stdout_line(&name).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Returns the catalog's service names in catalog order.
fn service_names(catalog: &ServiceCatalog) -> Vec<String> {
    catalog.services.keys().map(|name| name.as_str().to_string()).collect()
}

// ============================================================================
// SECTION: Construction Helpers
// ============================================================================

/// Loads configuration from the resolved path.
fn load_config(path: Option<&Path>) -> CliResult<BotoForgeConfig> {
    BotoForgeConfig::load(path).map_err(|err| CliError::new(format!("config load failed: {err}")))
}

/// Builds the JSON documentation store from configuration.
fn build_store(config: &BotoForgeConfig) -> CliResult<JsonDocumentationStore> {
    JsonDocumentationStore::new(&config.store.path, config.store.max_corpus_bytes)
        .map_err(|err| CliError::new(format!("store init failed: {err}")))
}

/// Builds the Gemini completion client from configuration and environment.
fn build_completion(config: &CompletionConfig) -> CliResult<GeminiCompletionService> {
    GeminiCompletionService::from_env(completion_settings(config))
        .map_err(|err| CliError::new(format!("completion init failed: {err}")))
}

/// Maps the loaded completion section onto the provider settings.
fn completion_settings(config: &CompletionConfig) -> GeminiCompletionConfig {
    GeminiCompletionConfig {
        endpoint: config.endpoint.clone(),
        model: config.model.clone(),
        api_key_env: config.api_key_env.clone(),
        timeout_ms: config.timeout_ms,
        max_response_bytes: config.max_response_bytes,
        allow_http: config.allow_http,
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns the error exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_ERROR)
}
