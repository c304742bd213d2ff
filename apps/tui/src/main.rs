//! terradex TUI: interactive provider schema browser.
//!
//! Three synchronized panes (navigator + search, field list, details),
//! built with `ratatui` + `crossterm`.

mod app;
mod panes;
mod widgets;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use terradex_core::{Browser, load_schema};
use terradex_shared::{AppConfig, SchemaSource, load_config, load_config_from};

/// Browse OpenTofu/Terraform provider schemas in the terminal.
#[derive(Parser)]
#[command(name = "terradex-tui", version, about, long_about = None)]
struct Args {
    /// Schema JSON file (output of `tofu providers schema -json`).
    #[arg(long, conflicts_with = "from_command")]
    schema: Option<PathBuf>,

    /// Run the configured schema command instead of reading a file.
    #[arg(long)]
    from_command: bool,

    /// Config file to use instead of ~/.terradex/terradex.toml.
    #[arg(long, env = "TERRADEX_CONFIG")]
    config: Option<PathBuf>,

    /// Initial search query.
    #[arg(short, long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    init_tracing(&config.tui_log_file()?)?;

    let source = schema_source(&args, &config);
    tracing::info!(%source, "loading schema");
    let schema = load_schema(&source)
        .wrap_err_with(|| format!("could not load schema from {source}"))?;

    app::run(Browser::new(schema), config.ui, args.query.as_deref())
}

fn schema_source(args: &Args, config: &AppConfig) -> SchemaSource {
    if let Some(path) = &args.schema {
        return SchemaSource::File(path.clone());
    }
    if args.from_command {
        let mut config = config.clone();
        config.schema.source = terradex_shared::SourceKind::Command;
        return config.schema_source();
    }
    config.schema_source()
}

/// The terminal is taken over by the UI, so logs go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("cannot create log directory {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("terradex=info"));

    fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
