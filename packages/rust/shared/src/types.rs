//! Parsed provider catalog.
//!
//! Mirrors the document printed by `tofu providers schema -json`. Every map is
//! an [`IndexMap`] so the order providers, items and attributes appear in the
//! document is the order they are displayed in. Nothing here is mutated after
//! parsing.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// SchemaModel
// ---------------------------------------------------------------------------

/// The whole provider catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaModel {
    /// Document format version (`"1.0"` for current tofu/terraform releases).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,

    /// Provider address → provider schema, in document order.
    #[serde(rename = "provider_schemas", default)]
    pub providers: IndexMap<String, ProviderSchema>,
}

impl SchemaModel {
    /// Look up a provider by its full name.
    pub fn provider(&self, name: &str) -> Option<&ProviderSchema> {
        self.providers.get(name)
    }

    /// Number of providers in the catalog.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Total number of resources, data sources and functions across all providers.
    pub fn item_count(&self) -> usize {
        self.providers.values().map(ProviderSchema::item_count).sum()
    }
}

// ---------------------------------------------------------------------------
// ProviderSchema
// ---------------------------------------------------------------------------

/// Everything one provider exposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSchema {
    /// Managed resources.
    #[serde(rename = "resource_schemas", default)]
    pub resources: IndexMap<String, ItemSchema>,

    /// Data sources.
    #[serde(rename = "data_source_schemas", default)]
    pub data_sources: IndexMap<String, ItemSchema>,

    /// Provider-defined functions.
    #[serde(default)]
    pub functions: IndexMap<String, FunctionSpec>,
}

impl ProviderSchema {
    pub fn resource(&self, name: &str) -> Option<&Block> {
        self.resources.get(name).map(|s| &s.block)
    }

    pub fn data_source(&self, name: &str) -> Option<&Block> {
        self.data_sources.get(name).map(|s| &s.block)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    pub fn item_count(&self) -> usize {
        self.resources.len() + self.data_sources.len() + self.functions.len()
    }
}

/// A resource or data source entry: a versioned [`Block`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSchema {
    /// Schema version of the item.
    #[serde(default)]
    pub version: u64,

    #[serde(default)]
    pub block: Block,
}

/// Attribute container of a resource or data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeSpec>,
}

/// One attribute of a [`Block`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Captured only so it stays out of `extra_fields`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_kind: Option<String>,

    /// Every other key (`type`, `required`, `optional`, `computed`, `sensitive`, ...).
    #[serde(flatten)]
    pub extra_fields: IndexMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// A provider-defined function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// cty type expression rendered as text.
    #[serde(
        default,
        deserialize_with = "type_expression",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_type: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,

    /// Trailing parameter accepting any number of arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variadic_parameter: Option<ParameterSpec>,
}

/// One positional function parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(default)]
    pub name: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "type_expression",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Render a JSON value as display text: strings verbatim, everything else as
/// compact JSON (`["list","string"]`, `true`, `{"a":1}`).
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// cty types arrive either as a bare string (`"string"`) or as a nested array
/// (`["list", "string"]`).
fn type_expression<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| value_to_text(&v)))
}
