//! Moving-penetration manifest CLI
//!
//! Command-line interface for listing, validating and exporting the
//! regression test manifest consumed by the simulation test harness.

use std::process;

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use pl_manifest::cli::{
    handle_check, handle_config, handle_export, handle_list, handle_show, handle_summary, Cli,
    CommandContext, Commands,
};
use pl_manifest::config::AppConfig;
use pl_manifest::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        error!(category = e.category(), "Command failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration from file and environment
    let config = AppConfig::load(cli.global.config.clone()).await?;

    // Initialize logging based on verbosity
    init_logging(&cli, &config);

    info!("pl_manifest v{} starting", env!("CARGO_PKG_VERSION"));

    // Execute the requested command
    let ctx = CommandContext::new(config, &cli.global);
    match cli.command {
        Commands::List(args) => handle_list(args, &ctx).await,
        Commands::Show(args) => handle_show(args, &ctx).await,
        Commands::Check(args) => handle_check(args, &ctx).await,
        Commands::Export(args) => handle_export(args, &ctx).await,
        Commands::Summary { json } => handle_summary(json, &ctx).await,
        Commands::Config(args) => handle_config(args, &ctx).await,
    }
}

/// Initialize logging from CLI flags, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    // Flags win over RUST_LOG, which wins over the configured level
    let filter = match cli.log_level() {
        Some(level) => EnvFilter::new(format!("pl_manifest={}", level.to_string().to_lowercase())),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("pl_manifest={}", config.logging.level))
        }),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    }
}
