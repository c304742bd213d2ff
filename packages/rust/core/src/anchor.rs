//! Field-pick anchors.
//!
//! A field name maps to an anchor token by lowercasing it and replacing
//! spaces with hyphens. Every other character, underscores included, is kept.
//! The token is matched against the tokens of the current document's headings.
//! Field headings (level 2) are tried first, so an attribute named like its
//! item, or a function named like a subsection, lands on its own section.

use tracing::debug;

use crate::detail::{DetailDocument, Section};

/// Heading level of attribute and function sections.
const FIELD_LEVEL: u8 = 2;

/// Anchor token for a heading or field name.
pub fn anchor_for(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Where a field pick lands inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTarget {
    pub token: String,
    /// Index of the matching section.
    pub section: usize,
    /// Line of that section's heading in [`DetailDocument::lines`].
    pub line: usize,
}

/// Locate the section whose heading derives the same token as `field`: the
/// first field-level match, else the first match at any level.
///
/// `None` is the non-fatal "anchor not found" outcome: the view stays where it is.
pub fn resolve_anchor(document: &DetailDocument, field: &str) -> Option<AnchorTarget> {
    let token = anchor_for(field);
    let sections = document.sections();
    let matches = |s: &Section| anchor_for(&s.heading) == token;
    let found = sections
        .iter()
        .position(|s| s.level == FIELD_LEVEL && matches(s))
        .or_else(|| sections.iter().position(|s| matches(s)));

    match found {
        Some(section) => {
            let line = document.section_line(section)?;
            Some(AnchorTarget {
                token,
                section,
                line,
            })
        }
        None => {
            debug!(%token, "anchor not found in current document");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::render;
    use crate::test_support::sample_schema;
    use crate::tree::Category;
    use terradex_shared::SchemaModel;

    #[test]
    fn token_derivation() {
        assert_eq!(anchor_for("instance_type"), "instance_type");
        assert_eq!(anchor_for("Return Type"), "return-type");
        assert_eq!(anchor_for("Data Sources"), "data-sources");
        assert_eq!(anchor_for("a.b/c"), "a.b/c");
    }

    #[test]
    fn token_derivation_is_deterministic() {
        for name in ["instance_type", "Return Type", "arn_parse", "  Two  Spaces "] {
            assert_eq!(anchor_for(name), anchor_for(name));
            assert_eq!(anchor_for(name).len(), name.to_lowercase().len());
            assert!(!anchor_for(name).contains(' '));
        }
    }

    #[test]
    fn attribute_pick_lands_on_its_heading() {
        let detail = render(
            &sample_schema(),
            "aws",
            Category::Resources,
            Some("aws_s3_bucket"),
        );
        let target = resolve_anchor(&detail.document, "tags").unwrap();

        assert_eq!(target.token, "tags");
        assert_eq!(target.section, 2);
        assert_eq!(detail.document.lines()[target.line], "## tags");
    }

    #[test]
    fn function_name_is_its_own_anchor() {
        let detail = render(&sample_schema(), "aws", Category::Functions, Some("arn_parse"));
        let target = resolve_anchor(&detail.document, &detail.field_names[0]).unwrap();
        assert_eq!(target.section, 0);
        assert_eq!(target.line, 0);
    }

    #[test]
    fn category_document_anchors_every_function() {
        let detail = render(&sample_schema(), "aws", Category::Functions, None);
        let lines = detail.document.lines();
        for name in &detail.field_names {
            let target = resolve_anchor(&detail.document, name).unwrap();
            assert_eq!(lines[target.line], format!("## {name}"));
        }
    }

    #[test]
    fn heading_match_ignores_case_and_spaces() {
        let detail = render(&sample_schema(), "aws", Category::Functions, Some("arn_build"));
        let target = resolve_anchor(&detail.document, "return type").unwrap();
        assert_eq!(detail.document.sections()[target.section].heading, "Return Type");
    }

    #[test]
    fn field_heading_wins_over_item_heading() {
        let schema: SchemaModel = serde_json::from_str(
            r#"{"provider_schemas": {"p": {"resource_schemas": {"name": {"block": {"attributes": {
                "id": {},
                "name": {}
            }}}}}}}"#,
        )
        .unwrap();
        let detail = render(&schema, "p", Category::Resources, Some("name"));
        let target = resolve_anchor(&detail.document, "name").unwrap();
        assert_eq!(target.section, 2);
        assert_eq!(detail.document.lines()[target.line], "## name");
    }

    #[test]
    fn function_named_like_a_subsection_lands_on_itself() {
        let schema: SchemaModel = serde_json::from_str(
            r#"{"provider_schemas": {"p": {"functions": {
                "first": {"return_type": "string"},
                "description": {"return_type": "string"}
            }}}}"#,
        )
        .unwrap();
        let detail = render(&schema, "p", Category::Functions, None);
        let lines = detail.document.lines();

        let target = resolve_anchor(&detail.document, "description").unwrap();
        assert_eq!(lines[target.line], "## description");
        // the earlier function's subsection comes first in the document
        let subsection = lines.iter().position(|l| l == "### Description").unwrap();
        assert!(subsection < target.line);
    }

    #[test]
    fn missing_anchor_is_reported_not_raised() {
        let detail = render(&sample_schema(), "aws", Category::Resources, Some("aws_instance"));
        assert_eq!(resolve_anchor(&detail.document, "no_such_field"), None);
    }
}
