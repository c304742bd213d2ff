//! Application configuration for terradex.
//!
//! User config lives at `~/.terradex/terradex.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerradexError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "terradex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".terradex";

/// Default TUI log file name, created inside the config directory.
const TUI_LOG_FILE_NAME: &str = "terradex-tui.log";

// ---------------------------------------------------------------------------
// Config structs (matching terradex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the provider schema document comes from.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Interactive browser behaviour.
    #[serde(default)]
    pub ui: UiConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the schema document is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Read a JSON file produced earlier by `tofu providers schema -json`.
    File,
    /// Run the schema command and read its stdout.
    Command,
}

/// `[schema]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Which source to use by default.
    #[serde(default = "default_source")]
    pub source: SourceKind,

    /// Path of the schema JSON file.
    #[serde(default = "default_schema_path")]
    pub path: String,

    /// Program that prints the schema document.
    #[serde(default = "default_command")]
    pub command: String,

    /// Arguments passed to `command`.
    #[serde(default = "default_command_args")]
    pub args: Vec<String>,

    /// Directory the command runs in (an initialised Terraform/OpenTofu project).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            path: default_schema_path(),
            command: default_command(),
            args: default_command_args(),
            working_dir: None,
        }
    }
}

fn default_source() -> SourceKind {
    SourceKind::File
}
fn default_schema_path() -> String {
    "/tmp/schema.json".into()
}
fn default_command() -> String {
    "tofu".into()
}
fn default_command_args() -> Vec<String> {
    vec!["providers".into(), "schema".into(), "-json".into()]
}

/// `[ui]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Quiet period after the last search keystroke before the tree is refiltered.
    #[serde(default = "default_debounce")]
    pub search_debounce_ms: u64,

    /// Expand every node of a filtered tree.
    #[serde(default = "default_true")]
    pub expand_filtered: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_debounce(),
            expand_filtered: true,
        }
    }
}

fn default_debounce() -> u64 {
    150
}
fn default_true() -> bool {
    true
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// TUI log file; defaults to `~/.terradex/terradex-tui.log`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

// ---------------------------------------------------------------------------
// Schema source (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Resolved schema source handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Read and parse a JSON file.
    File(PathBuf),
    /// Spawn a program and parse its stdout.
    Command {
        program: String,
        args: Vec<String>,
        working_dir: Option<PathBuf>,
    },
}

impl std::fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Command { program, args, .. } => write!(f, "{program} {}", args.join(" ")),
        }
    }
}

impl AppConfig {
    /// Resolve the configured schema source.
    pub fn schema_source(&self) -> SchemaSource {
        match self.schema.source {
            SourceKind::File => SchemaSource::File(PathBuf::from(&self.schema.path)),
            SourceKind::Command => SchemaSource::Command {
                program: self.schema.command.clone(),
                args: self.schema.args.clone(),
                working_dir: self.schema.working_dir.as_ref().map(PathBuf::from),
            },
        }
    }

    /// Resolve the TUI log file path.
    pub fn tui_log_file(&self) -> Result<PathBuf> {
        match &self.logging.file {
            Some(file) => Ok(PathBuf::from(file)),
            None => Ok(config_dir()?.join(TUI_LOG_FILE_NAME)),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.terradex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TerradexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.terradex/terradex.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TerradexError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TerradexError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TerradexError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TerradexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TerradexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
