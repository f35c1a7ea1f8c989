//! skewgen CLI entry point

use anyhow::{Context, Result};
use skewgen::config::cli::Cli;
use skewgen::config::toml::merge_cli_with_config;
use skewgen::config::{self, validator, PartialConfig};
use skewgen::coordinator;
use skewgen::output::text::{print_configuration, print_summary};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    cli.validate()?;

    println!("skewgen v{}", env!("CARGO_PKG_VERSION"));
    println!("Skewed table generator for distributed join benchmarks");
    println!();

    let from_file = match &cli.config {
        Some(path) => config::load_file(path)?,
        None => PartialConfig::default(),
    };
    let config = merge_cli_with_config(&cli, from_file)
        .build()
        .context("Incomplete configuration")?;

    validator::validate_config(&config).context("Configuration validation failed")?;

    print_configuration(&config);

    if cli.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    let summary = coordinator::run(&config)?;
    print_summary(&summary);

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}
