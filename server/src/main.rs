//! Folio preview server binary.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;

/// Command-line interface for the preview server.
#[derive(Parser)]
#[command(
    name = "folio-server",
    version,
    about = "Preview a built Folio site, search bundle included"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the built site (overrides server.site_root)
    #[arg(long)]
    site_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio_server::init_tracing(cli.verbose);

    let mut config = Config::load_with_env(&cli.config).wrap_err("Failed to load configuration")?;

    if let Some(port) = cli.port {
        tracing::info!(port, "Overriding server port from CLI");
        config.server.port = port;
    }

    if let Some(site_root) = cli.site_root {
        tracing::info!(?site_root, "Overriding site root from CLI");
        config.server.site_root = site_root.to_string_lossy().to_string();
    }

    tracing::debug!(?config, "Loaded configuration");

    folio_server::serve(&config).await
}
