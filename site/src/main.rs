use std::path::PathBuf;

use clap::Parser;
use site::config::{AppConfig, AppConfigOverrides};
use site::telemetry::init_tracing;

#[derive(Parser)]
#[command(
    name = "portfolio",
    author,
    version,
    about = "Arthuro Visuals portfolio server"
)]
struct Cli {
    /// Address to listen on (e.g. 127.0.0.1:8080)
    #[arg(long)]
    bind: Option<String>,
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override log level (e.g. info, debug)
    #[arg(long)]
    log_level: Option<String>,
    /// Override the bundled images directory
    #[arg(long)]
    images_dir: Option<PathBuf>,
    /// Photo source for galleries: cdn or bundled
    #[arg(long)]
    photo_source: Option<String>,
    /// Enable tokio console for debugging
    #[arg(long)]
    debug_console: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = AppConfigOverrides {
        log_level: cli.log_level,
        bind_addr: cli.bind,
        images_dir: cli.images_dir,
        photo_source: cli.photo_source,
        debug_console: cli.debug_console,
        ..Default::default()
    };
    let cfg = AppConfig::load_from(cli.config).apply_overrides(&overrides);
    let _guard = init_tracing(&cfg, "portfolio.log");

    site::serve(cfg).await
}
