//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use terradex_core::{Browser, Category, Detail, load_schema, render, resolve_anchor};
use terradex_shared::{
    AppConfig, SchemaModel, SchemaSource, SourceKind, init_config, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// terradex: browse OpenTofu/Terraform provider schemas.
#[derive(Parser)]
#[command(
    name = "terradex",
    version,
    about = "Browse provider schemas: resources, data sources and functions.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Schema JSON file (output of `tofu providers schema -json`).
    #[arg(long, global = true, conflicts_with = "from_command")]
    pub schema: Option<PathBuf>,

    /// Run the configured schema command instead of reading a file.
    #[arg(long, global = true)]
    pub from_command: bool,

    /// Config file to use instead of ~/.terradex/terradex.toml.
    #[arg(long, global = true, env = "TERRADEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print the navigation tree, optionally filtered by a query.
    Tree {
        /// Case-insensitive substring filter.
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Render the details of a category or item as Markdown.
    Show {
        /// Provider name, e.g. registry.opentofu.org/hashicorp/aws.
        provider: String,

        /// resources, data-sources or functions.
        category: Category,

        /// Item name. Omit to render the whole category (functions only).
        item: Option<String>,
    },

    /// List the fields of a selection with their anchors.
    Fields {
        /// Provider name.
        provider: String,

        /// resources, data-sources or functions.
        category: Category,

        /// Item name.
        item: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so command
/// output on stdout stays pipeable.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "terradex=warn",
        1 => "terradex=info",
        2 => "terradex=debug",
        _ => "terradex=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Tree { query } => cmd_tree(&cli, query.as_deref()),
        Command::Show {
            provider,
            category,
            item,
        } => cmd_show(&cli, provider, *category, item.as_deref()),
        Command::Fields {
            provider,
            category,
            item,
        } => cmd_fields(&cli, provider, *category, item.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&cli),
        },
    }
}

// ---------------------------------------------------------------------------
// Schema loading
// ---------------------------------------------------------------------------

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn schema_source(cli: &Cli, config: &AppConfig) -> SchemaSource {
    if let Some(path) = &cli.schema {
        return SchemaSource::File(path.clone());
    }
    if cli.from_command {
        let mut config = config.clone();
        config.schema.source = SourceKind::Command;
        return config.schema_source();
    }
    config.schema_source()
}

fn load(cli: &Cli) -> Result<SchemaModel> {
    let config = resolve_config(cli)?;
    let source = schema_source(cli, &config);
    info!(%source, "loading schema");

    // Running the provider command can take a while; show a spinner.
    let spinner = match &source {
        SchemaSource::Command { .. } => Some(spinner(&format!("Running {source}"))),
        SchemaSource::File(_) => None,
    };
    let result = load_schema(&source);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let schema = result.wrap_err_with(|| format!("could not load schema from {source}"))?;
    info!(
        providers = schema.provider_count(),
        items = schema.item_count(),
        "schema loaded"
    );
    Ok(schema)
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_tree(cli: &Cli, query: Option<&str>) -> Result<()> {
    let mut browser = Browser::new(load(cli)?);
    if let Some(query) = query {
        browser.set_query(query);
    }

    if browser.tree().provider_labels().is_empty() {
        match browser.query() {
            Some(query) => println!("No matches for '{query}'."),
            None => println!("Schema contains no providers."),
        }
        return Ok(());
    }
    print!("{}", browser.tree().to_outline());
    Ok(())
}

fn render_checked(
    schema: &SchemaModel,
    provider: &str,
    category: Category,
    item: Option<&str>,
) -> Result<Detail> {
    if schema.provider(provider).is_none() {
        let known: Vec<&str> = schema.providers.keys().map(String::as_str).collect();
        return Err(eyre!(
            "unknown provider '{provider}' (available: {})",
            known.join(", ")
        ));
    }
    Ok(render(schema, provider, category, item))
}

fn cmd_show(cli: &Cli, provider: &str, category: Category, item: Option<&str>) -> Result<()> {
    let schema = load(cli)?;
    let detail = render_checked(&schema, provider, category, item)?;
    print!("{}", detail.document.to_markdown());
    Ok(())
}

fn cmd_fields(cli: &Cli, provider: &str, category: Category, item: Option<&str>) -> Result<()> {
    let schema = load(cli)?;
    let detail = render_checked(&schema, provider, category, item)?;

    if detail.field_names.is_empty() {
        println!("No fields.");
        return Ok(());
    }

    let width = detail.field_names.iter().map(String::len).max().unwrap_or(0);
    for field in &detail.field_names {
        match resolve_anchor(&detail.document, field) {
            Some(target) => println!(
                "{field:<width$}  #{}  (line {})",
                target.token,
                target.line + 1
            ),
            None => println!("{field:<width$}  (no section)"),
        }
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_category_spellings() {
        let cli = Cli::try_parse_from([
            "terradex",
            "--schema",
            "schema.json",
            "show",
            "aws",
            "data-sources",
            "aws_ami",
        ])
        .unwrap();
        match cli.command {
            Command::Show {
                provider,
                category,
                item,
            } => {
                assert_eq!(provider, "aws");
                assert_eq!(category, Category::DataSources);
                assert_eq!(item.as_deref(), Some("aws_ami"));
            }
            _ => panic!("expected show"),
        }
        assert_eq!(cli.schema, Some(PathBuf::from("schema.json")));
    }

    #[test]
    fn schema_file_conflicts_with_command() {
        let result =
            Cli::try_parse_from(["terradex", "--schema", "s.json", "--from-command", "tree"]);
        assert!(result.is_err());
    }

    #[test]
    fn from_command_overrides_configured_source() {
        let cli = Cli::try_parse_from(["terradex", "--from-command", "tree"]).unwrap();
        let source = schema_source(&cli, &AppConfig::default());
        assert!(matches!(source, SchemaSource::Command { ref program, .. } if program == "tofu"));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = Cli::try_parse_from(["terradex", "show", "aws", "modules"]);
        assert!(result.is_err());
    }
}
