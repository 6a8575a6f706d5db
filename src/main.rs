//! eqcurve CLI
//!
//! Command-line interface for EQ curve computation.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use eqcurve::cli::{commands, Cli, Commands};
use eqcurve::ResponseConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info, or debug with --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Design {
            filter_type,
            freq,
            q,
            gain,
            sample_rate,
            normalize,
        } => commands::design_filter(filter_type, freq, q, gain, sample_rate, normalize)?,
        Commands::Sweep { min, max, points } => commands::sweep(min, max, points)?,
        Commands::Response {
            filters,
            config,
            mode,
            group_delay,
            pretty,
        } => {
            let mut config = match config {
                Some(path) => ResponseConfig::from_file(&path)?,
                None => ResponseConfig::default(),
            };
            if let Some(mode) = mode {
                config.combine_mode = mode;
            }
            commands::response(&filters, config, group_delay, pretty)?;
        }
    }

    Ok(())
}
