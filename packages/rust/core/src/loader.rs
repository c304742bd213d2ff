//! Schema acquisition.
//!
//! Reads the provider catalog either from a JSON file or from the stdout of
//! `tofu providers schema -json` (any compatible command). This is the only
//! place in the crate that can fail.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info, instrument, warn};

use terradex_shared::{Result, SchemaModel, SchemaSource, TerradexError};

/// Load the schema from the configured source.
#[instrument(skip_all, fields(source = %source))]
pub fn load_schema(source: &SchemaSource) -> Result<SchemaModel> {
    let schema = match source {
        SchemaSource::File(path) => read_schema_file(path)?,
        SchemaSource::Command {
            program,
            args,
            working_dir,
        } => run_schema_command(program, args, working_dir.as_deref())?,
    };

    info!(
        providers = schema.provider_count(),
        items = schema.item_count(),
        "schema loaded"
    );
    Ok(schema)
}

/// Read and parse a schema JSON file.
pub fn read_schema_file(path: &Path) -> Result<SchemaModel> {
    let content = std::fs::read_to_string(path).map_err(|e| TerradexError::io(path, e))?;
    debug!(bytes = content.len(), "schema file read");
    parse_schema_document(&content)
}

/// Run `program args...` and parse its stdout as a schema document.
pub fn run_schema_command(
    program: &str,
    args: &[String],
    working_dir: Option<&Path>,
) -> Result<SchemaModel> {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }

    debug!(program, ?args, ?working_dir, "running schema command");
    let output = command
        .output()
        .map_err(|e| TerradexError::Loader(format!("failed to spawn {program}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TerradexError::Loader(format!(
            "{program} exited with status {}: {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|e| TerradexError::parse(format!("schema output is not UTF-8: {e}")))?;
    parse_schema_document(&stdout)
}

/// Parse the raw JSON document.
///
/// A document carrying neither `format_version` nor `provider_schemas` is
/// rejected; it is almost certainly some other JSON file.
pub fn parse_schema_document(json: &str) -> Result<SchemaModel> {
    let schema: SchemaModel = serde_json::from_str(json)
        .map_err(|e| TerradexError::parse(format!("invalid schema document: {e}")))?;

    if schema.format_version.is_none() && schema.providers.is_empty() {
        return Err(TerradexError::validation(
            "document has no provider_schemas; expected output of `tofu providers schema -json`",
        ));
    }

    if let Some(version) = schema.format_version.as_deref() {
        if !version.starts_with("1.") {
            warn!(version, "unrecognised schema format version, continuing");
        }
    }

    Ok(schema)
}
