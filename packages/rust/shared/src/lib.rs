//! Shared types, error model, and configuration for terradex.
//!
//! This crate is the foundation depended on by all other terradex crates.
//! It provides:
//! - [`TerradexError`]: the unified error type
//! - The parsed provider catalog ([`SchemaModel`], [`ProviderSchema`], [`Block`],
//!   [`AttributeSpec`], [`FunctionSpec`], [`ParameterSpec`])
//! - Configuration ([`AppConfig`], [`SchemaSource`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, LoggingConfig, SchemaConfig, SchemaSource, SourceKind, UiConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, TerradexError};
pub use types::{
    AttributeSpec, Block, FunctionSpec, ItemSchema, ParameterSpec, ProviderSchema, SchemaModel,
    value_to_text,
};
