//! SEO Analyzer main entry point
//!
//! This is the command-line interface: it either serves the analysis API or
//! runs a single analysis and prints the result.

use anyhow::Context;
use clap::{Parser, Subcommand};
use seo_analyzer::analyzer::{classify_logged, AnalysisResponse, Analyzer};
use seo_analyzer::config::{load_runtime_config, Config};
use seo_analyzer::server::start_server;
use seo_analyzer::url::AnalysisRequest;
use seo_analyzer::AnalysisError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// SEO Analyzer: single-page SEO scoring
///
/// Fetches a page, extracts its SEO signals and scores them from 0 to 100.
#[derive(Parser, Debug)]
#[command(name = "seo-analyzer")]
#[command(version)]
#[command(about = "Single-page SEO scoring service", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the analysis API
    Serve {
        /// Port to listen on (overrides PORT and the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Analyze a single URL and print the result as JSON
    Analyze {
        /// Absolute http(s) URL of the page
        url: String,

        /// Also print the extracted SEO signals
        #[arg(long)]
        signals: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_runtime_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(hash) = config_hash {
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
    }

    let analyzer =
        Analyzer::new(&config.user_agent).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Serve { port } => {
            handle_serve(config, port, analyzer).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze { url, signals } => handle_analyze(&analyzer, &url, signals).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_analyzer=info,warn"),
            1 => EnvFilter::new("seo_analyzer=debug,info"),
            2 => EnvFilter::new("seo_analyzer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the `serve` command
async fn handle_serve(
    mut config: Config,
    port: Option<u16>,
    analyzer: Analyzer,
) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!(
        "Fetch limits: timeout {:?}, {} redirects, {} bytes, invalid certs accepted: {}",
        analyzer.options().timeout,
        analyzer.options().max_redirects,
        analyzer.options().max_body_bytes,
        analyzer.options().accept_invalid_certs
    );

    start_server(&config.server, analyzer).await
}

/// Handles the `analyze` command
async fn handle_analyze(
    analyzer: &Analyzer,
    raw_url: &str,
    show_signals: bool,
) -> anyhow::Result<ExitCode> {
    let outcome = match AnalysisRequest::new(raw_url) {
        Ok(request) => analyzer
            .analyze_request(&request)
            .await
            .map(|analysis| (request, analysis)),
        Err(e) => Err(AnalysisError::from(e)),
    };

    match outcome {
        Ok((request, analysis)) => {
            if show_signals {
                println!("{}", serde_json::to_string_pretty(&analysis.signals)?);
            }
            let response = AnalysisResponse::new(request.raw_url, &analysis.result);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let classified = classify_logged(&e);
            eprintln!("{} ({})", classified.message, classified.status_code);
            println!("{}", serde_json::to_string_pretty(&classified)?);
            Ok(ExitCode::FAILURE)
        }
    }
}
