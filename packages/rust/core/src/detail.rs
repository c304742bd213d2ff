//! Detail documents for the selected resource, data source or function.
//!
//! A [`DetailDocument`] is an ordered list of headed sections whose bodies are
//! paragraphs and tables. It carries no styling; [`DetailDocument::to_markdown`]
//! and [`DetailDocument::lines`] give the presentation layer a text form with
//! known heading line offsets for anchor scrolling.

use tracing::{debug, instrument};

use terradex_shared::{
    Block, FunctionSpec, ParameterSpec, ProviderSchema, SchemaModel, value_to_text,
};

use crate::selection::ResolvedSelection;
use crate::tree::Category;

pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_SUMMARY: &str = "No summary available.";
pub const NO_RETURN_TYPE: &str = "No return type available.";
pub const NO_PARAMETERS: &str = "No parameters available.";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DETAILS_HEADING: &str = "No Details Available";
pub const NO_DETAILS_BODY: &str =
    "Select a valid resource, data source, or function to view details.";

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

/// A simple table with a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Section body element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Paragraph(String),
    Table(Table),
}

/// One addressable section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading level, 1 = top.
    pub level: u8,
    pub heading: String,
    pub body: Vec<Content>,
}

impl Section {
    fn new(level: u8, heading: impl Into<String>) -> Self {
        Self {
            level,
            heading: heading.into(),
            body: Vec::new(),
        }
    }

    fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.body.push(Content::Paragraph(text.into()));
        self
    }

    fn table(mut self, table: Table) -> Self {
        self.body.push(Content::Table(table));
        self
    }
}

/// Renderer-agnostic detail document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailDocument {
    sections: Vec<Section>,
}

impl DetailDocument {
    /// The fixed "no details" document.
    pub fn no_details() -> Self {
        Self {
            sections: vec![Section::new(1, NO_DETAILS_HEADING).paragraph(NO_DETAILS_BODY)],
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Markdown text of the document.
    pub fn to_markdown(&self) -> String {
        let mut text = self.layout().0.join("\n");
        text.push('\n');
        text
    }

    /// The Markdown text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.layout().0
    }

    /// Line offset of the heading of section `index` within [`Self::lines`].
    pub fn section_line(&self, index: usize) -> Option<usize> {
        self.layout().1.get(index).copied()
    }

    fn layout(&self) -> (Vec<String>, Vec<usize>) {
        let mut lines = Vec::new();
        let mut offsets = Vec::with_capacity(self.sections.len());

        for section in &self.sections {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            offsets.push(lines.len());
            lines.push(format!(
                "{} {}",
                "#".repeat(usize::from(section.level.max(1))),
                section.heading
            ));

            for content in &section.body {
                lines.push(String::new());
                match content {
                    Content::Paragraph(text) => lines.extend(text.lines().map(str::to_string)),
                    Content::Table(table) => push_table(&mut lines, table),
                }
            }
        }

        (lines, offsets)
    }
}

fn push_table(lines: &mut Vec<String>, table: &Table) {
    let row = |cells: &[String]| {
        let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
        format!("| {} |", cells.join(" | "))
    };
    lines.push(row(&table.headers));
    lines.push(format!(
        "|{}|",
        table.headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));
    for cells in &table.rows {
        lines.push(row(cells));
    }
}

/// Keep a cell on one table row.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Field list plus document for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    /// Names shown in the field list, in document order.
    pub field_names: Vec<String>,
    pub document: DetailDocument,
}

impl Detail {
    /// Empty field list and the fixed "no details" document.
    pub fn none() -> Self {
        Self {
            field_names: Vec::new(),
            document: DetailDocument::no_details(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.field_names.is_empty() && self.document == DetailDocument::no_details()
    }
}

impl Default for Detail {
    fn default() -> Self {
        Self::none()
    }
}

/// Render the detail for `(provider, category, item)`.
///
/// Total: unknown providers or items and unsupported combinations (a
/// resource or data source category without an item) give [`Detail::none`].
#[instrument(skip(schema))]
pub fn render(
    schema: &SchemaModel,
    provider: &str,
    category: Category,
    item: Option<&str>,
) -> Detail {
    let Some(provider_schema) = schema.provider(provider) else {
        debug!("provider not in schema");
        return Detail::none();
    };

    let detail = match (category, item) {
        (Category::Resources, Some(name)) => provider_schema
            .resource(name)
            .map(|block| render_block(name, block)),
        (Category::DataSources, Some(name)) => provider_schema
            .data_source(name)
            .map(|block| render_block(name, block)),
        (Category::Functions, Some(name)) => provider_schema
            .function(name)
            .map(|function| render_function(name, function)),
        (Category::Functions, None) => Some(render_all_functions(provider_schema)),
        (Category::Resources | Category::DataSources, None) => None,
    };

    detail.unwrap_or_else(|| {
        debug!("no detail for selection");
        Detail::none()
    })
}

/// Render a resolved selection; `None` renders the "no details" document.
pub fn render_selection(schema: &SchemaModel, selection: Option<&ResolvedSelection>) -> Detail {
    match selection {
        Some(s) => render(schema, &s.provider, s.category, s.item.as_deref()),
        None => Detail::none(),
    }
}

fn render_block(name: &str, block: &Block) -> Detail {
    let mut sections = vec![Section::new(1, name)];

    for (attr_name, attr) in &block.attributes {
        let mut section = Section::new(2, attr_name)
            .paragraph(attr.description.as_deref().unwrap_or(NO_DESCRIPTION));
        if !attr.extra_fields.is_empty() {
            section = section.table(Table {
                headers: vec!["Field".into(), "Value".into()],
                rows: attr
                    .extra_fields
                    .iter()
                    .map(|(field, value)| vec![field.clone(), value_to_text(value)])
                    .collect(),
            });
        }
        sections.push(section);
    }

    Detail {
        field_names: block.attributes.keys().cloned().collect(),
        document: DetailDocument { sections },
    }
}

fn render_function(name: &str, function: &FunctionSpec) -> Detail {
    let mut sections = vec![Section::new(1, name)];
    sections.extend(function_sections(function, 2));
    Detail {
        field_names: vec![name.to_string()],
        document: DetailDocument { sections },
    }
}

fn render_all_functions(provider: &ProviderSchema) -> Detail {
    let mut sections = vec![Section::new(1, Category::Functions.label())];
    for (name, function) in &provider.functions {
        sections.push(Section::new(2, name));
        sections.extend(function_sections(function, 3));
    }
    Detail {
        field_names: provider.functions.keys().cloned().collect(),
        document: DetailDocument { sections },
    }
}

/// Summary, Description, Return Type and Parameters at heading `level`.
fn function_sections(function: &FunctionSpec, level: u8) -> Vec<Section> {
    let parameters = Section::new(level, "Parameters");
    let parameters = if function.parameters.is_empty() && function.variadic_parameter.is_none() {
        parameters.paragraph(NO_PARAMETERS)
    } else {
        let mut rows: Vec<Vec<String>> = function
            .parameters
            .iter()
            .map(|p| parameter_row(p, ""))
            .collect();
        if let Some(variadic) = &function.variadic_parameter {
            rows.push(parameter_row(variadic, "..."));
        }
        parameters.table(Table {
            headers: vec!["Name".into(), "Type".into(), "Description".into()],
            rows,
        })
    };

    vec![
        Section::new(level, "Summary")
            .paragraph(function.summary.as_deref().unwrap_or(NO_SUMMARY)),
        Section::new(level, "Description")
            .paragraph(function.description.as_deref().unwrap_or(NO_DESCRIPTION)),
        Section::new(level, "Return Type")
            .paragraph(function.return_type.as_deref().unwrap_or(NO_RETURN_TYPE)),
        parameters,
    ]
}

fn parameter_row(parameter: &ParameterSpec, suffix: &str) -> Vec<String> {
    let name = if parameter.name.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        format!("{}{suffix}", parameter.name)
    };
    vec![
        name,
        parameter
            .type_name
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        parameter
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
    ]
}
