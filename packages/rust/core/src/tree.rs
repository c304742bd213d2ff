//! Navigation tree builder.
//!
//! Builds the `Provider → {Resources, Data Sources, Functions} → item`
//! hierarchy shown in the navigator. Nodes live in an arena; children are
//! owned top-down through index lists and every node keeps a non-owning
//! `parent` index used only for ancestry lookups.
//!
//! Trees are never patched. A query change discards the displayed tree and a
//! fresh one is built from the [`MatchSet`].

use std::fmt;

use tracing::{debug, instrument};

use terradex_shared::{ProviderSchema, SchemaModel};

use crate::search::MatchSet;

/// Label of the synthetic root node.
pub const ROOT_LABEL: &str = "Providers";

// ---------------------------------------------------------------------------
// Node types
// ---------------------------------------------------------------------------

/// The three item groups a provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Resources,
    DataSources,
    Functions,
}

impl Category {
    /// Display order under a provider.
    pub const ALL: [Category; 3] = [Self::Resources, Self::DataSources, Self::Functions];

    /// Label used for the category node.
    pub fn label(self) -> &'static str {
        match self {
            Self::Resources => "Resources",
            Self::DataSources => "Data Sources",
            Self::Functions => "Functions",
        }
    }

    /// Item names of this category in schema order.
    pub fn item_names(self, provider: &ProviderSchema) -> Vec<&str> {
        match self {
            Self::Resources => provider.resources.keys().map(String::as_str).collect(),
            Self::DataSources => provider.data_sources.keys().map(String::as_str).collect(),
            Self::Functions => provider.functions.keys().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Accepts the node label or a kebab/snake-case spelling
    /// (`data-sources`, `data_sources`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "resources" | "resource" => Ok(Self::Resources),
            "data sources" | "data source" => Ok(Self::DataSources),
            "functions" | "function" => Ok(Self::Functions),
            _ => Err(format!(
                "unknown category '{s}': expected resources, data-sources or functions"
            )),
        }
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Provider,
    Category(Category),
    Item,
}

/// Arena index of a node. Only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    pub kind: NodeKind,
    pub label: String,
    /// Lookup-only back-reference; `None` for the root.
    pub parent: Option<NodeId>,
    /// Owned children in display order. Empty for items.
    pub children: Vec<NodeId>,
}

impl NavNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A visible row when the tree is flattened for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRow {
    pub id: NodeId,
    pub depth: usize,
}

// ---------------------------------------------------------------------------
// NavigationTree
// ---------------------------------------------------------------------------

/// Arena-backed navigation tree. Index 0 is always the root.
///
/// Two trees compare equal when they have the same shape, kinds and labels in
/// the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTree {
    nodes: Vec<NavNode>,
}

impl NavigationTree {
    /// Build a tree from `schema`, optionally restricted to `filter`.
    ///
    /// Without a filter every provider is included, and a category node is
    /// added for each non-empty item group. With a filter, a provider appears
    /// only when at least one of its items matched; a match on the provider
    /// name alone is not enough.
    #[instrument(skip_all, fields(filtered = filter.is_some()))]
    pub fn build(schema: &SchemaModel, filter: Option<&MatchSet>) -> Self {
        let mut tree = Self::empty();
        let root = tree.root();

        for (name, provider) in &schema.providers {
            let groups: Vec<(Category, Vec<&str>)> = match filter {
                None => Category::ALL
                    .iter()
                    .map(|&c| (c, c.item_names(provider)))
                    .collect(),
                Some(matches) => {
                    let Some(found) = matches.provider(name) else {
                        continue;
                    };
                    if !found.has_item_matches() {
                        continue;
                    }
                    Category::ALL
                        .iter()
                        .map(|&c| (c, found.items(c).iter().map(String::as_str).collect()))
                        .collect()
                }
            };

            let provider_node = tree.push(root, NodeKind::Provider, name);
            for (category, items) in groups {
                if items.is_empty() {
                    continue;
                }
                let category_node =
                    tree.push(provider_node, NodeKind::Category(category), category.label());
                for item in items {
                    tree.push(category_node, NodeKind::Item, item);
                }
            }
        }

        debug!(
            providers = tree.children(root).len(),
            nodes = tree.len(),
            "navigation tree built"
        );
        tree
    }

    /// A tree holding only the root.
    pub fn empty() -> Self {
        Self {
            nodes: vec![NavNode {
                kind: NodeKind::Root,
                label: ROOT_LABEL.to_string(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind, label: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NavNode {
            kind,
            label: label.to_string(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Node by id; `None` for an id this tree never issued.
    pub fn node(&self, id: NodeId) -> Option<&NavNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Label of a node, or `""` for an unknown id.
    pub fn label(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.label.as_str()).unwrap_or("")
    }

    /// Labels of the provider nodes, in display order.
    pub fn provider_labels(&self) -> Vec<&str> {
        self.children(self.root())
            .iter()
            .map(|&id| self.label(id))
            .collect()
    }

    /// Locate a provider, category or item node by labels.
    pub fn find(
        &self,
        provider: &str,
        category: Option<Category>,
        item: Option<&str>,
    ) -> Option<NodeId> {
        let provider_id = self.child_with_label(self.root(), provider)?;
        let Some(category) = category else {
            return Some(provider_id);
        };
        let category_id = self
            .children(provider_id)
            .iter()
            .copied()
            .find(|&id| self.node(id).map(|n| n.kind) == Some(NodeKind::Category(category)))?;
        match item {
            Some(item) => self.child_with_label(category_id, item),
            None => Some(category_id),
        }
    }

    fn child_with_label(&self, parent: NodeId, label: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.label(id) == label)
    }

    /// Flatten the tree depth-first, descending only into expanded nodes.
    /// The root is row 0 at depth 0.
    pub fn visible_rows(&self, is_expanded: impl Fn(NodeId) -> bool) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut stack = vec![TreeRow {
            id: self.root(),
            depth: 0,
        }];

        while let Some(row) = stack.pop() {
            rows.push(row);
            if is_expanded(row.id) {
                for &child in self.children(row.id).iter().rev() {
                    stack.push(TreeRow {
                        id: child,
                        depth: row.depth + 1,
                    });
                }
            }
        }

        rows
    }

    /// Every node that has children (used to fully expand filtered trees).
    pub fn branch_ids(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| !self.children(id).is_empty())
            .collect()
    }

    /// Indented plain-text outline of the whole tree.
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        for row in self.visible_rows(|_| true) {
            out.push_str(&"  ".repeat(row.depth));
            out.push_str(self.label(row.id));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Query, SearchIndex};
    use crate::test_support::sample_schema;

    fn filtered(query: &str) -> NavigationTree {
        let schema = sample_schema();
        let query = Query::parse(query).expect("non-empty query");
        let matches = SearchIndex::new(&schema).matches(&query);
        NavigationTree::build(&schema, Some(&matches))
    }

    #[test]
    fn unfiltered_tree_follows_schema_order() {
        let tree = NavigationTree::build(&sample_schema(), None);

        assert_eq!(tree.provider_labels(), vec!["aws", "google"]);
        let aws = tree.find("aws", None, None).unwrap();
        let categories: Vec<_> = tree.children(aws).iter().map(|&id| tree.label(id)).collect();
        assert_eq!(categories, vec!["Resources", "Data Sources", "Functions"]);

        let functions = tree.find("aws", Some(Category::Functions), None).unwrap();
        let names: Vec<_> = tree.children(functions).iter().map(|&id| tree.label(id)).collect();
        assert_eq!(names, vec!["arn_parse", "arn_build"]);

        let google = tree.find("google", None, None).unwrap();
        assert_eq!(tree.children(google).len(), 1);
    }

    #[test]
    fn empty_item_groups_get_no_category_node() {
        let tree = NavigationTree::build(&sample_schema(), None);
        assert!(tree.find("google", Some(Category::DataSources), None).is_none());
        assert!(tree.find("google", Some(Category::Functions), None).is_none());
    }

    #[test]
    fn parent_links_point_upward() {
        let tree = NavigationTree::build(&sample_schema(), None);
        let item = tree
            .find("aws", Some(Category::Resources), Some("aws_instance"))
            .unwrap();
        let category = tree.parent(item).unwrap();
        let provider = tree.parent(category).unwrap();

        assert_eq!(tree.node(category).unwrap().kind, NodeKind::Category(Category::Resources));
        assert_eq!(tree.label(provider), "aws");
        assert_eq!(tree.parent(provider), Some(tree.root()));
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn filter_keeps_only_matching_leaves() {
        let tree = filtered("inst");

        assert_eq!(tree.provider_labels(), vec!["aws"]);
        let aws = tree.find("aws", None, None).unwrap();
        assert_eq!(tree.children(aws).len(), 1);

        let resources = tree.find("aws", Some(Category::Resources), None).unwrap();
        let leaves: Vec<_> = tree.children(resources).iter().map(|&id| tree.label(id)).collect();
        assert_eq!(leaves, vec!["aws_instance"]);
    }

    #[test]
    fn filter_spans_categories_and_providers() {
        let tree = filtered("a");
        assert_eq!(tree.provider_labels(), vec!["aws"]);
        assert!(tree.find("aws", Some(Category::DataSources), Some("aws_ami")).is_some());
        assert!(tree.find("aws", Some(Category::Functions), Some("arn_parse")).is_some());

        let tree = filtered("network");
        assert_eq!(tree.provider_labels(), vec!["google"]);
    }

    #[test]
    fn provider_name_match_alone_is_excluded() {
        // "goog" matches the provider name but no item of it.
        let tree = filtered("goog");
        assert!(tree.find("google", None, None).is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn no_matches_yields_bare_root() {
        let tree = filtered("zzz-nothing");
        assert!(tree.is_empty());
        assert_eq!(tree.label(tree.root()), ROOT_LABEL);
    }

    #[test]
    fn rebuilding_without_filter_is_structurally_identical() {
        let schema = sample_schema();
        assert_eq!(
            NavigationTree::build(&schema, None),
            NavigationTree::build(&schema, None)
        );
        assert_ne!(NavigationTree::build(&schema, None), filtered("inst"));
    }

    #[test]
    fn visible_rows_respect_expansion() {
        let tree = NavigationTree::build(&sample_schema(), None);
        let root = tree.root();

        let collapsed = tree.visible_rows(|id| id == root);
        assert_eq!(collapsed.len(), 3);
        assert_eq!(collapsed[1].depth, 1);

        let all = tree.visible_rows(|_| true);
        assert_eq!(all.len(), tree.len());
        assert_eq!(tree.label(all[1].id), "aws");
        assert_eq!(tree.label(all[2].id), "Resources");
        assert_eq!(all[3].depth, 3);
    }

    #[test]
    fn outline_indents_by_depth() {
        let outline = filtered("inst").to_outline();
        assert_eq!(outline, "Providers\n  aws\n    Resources\n      aws_instance\n");
    }

    #[test]
    fn category_parses_from_cli_spellings() {
        assert_eq!("data-sources".parse::<Category>(), Ok(Category::DataSources));
        assert_eq!("Data Sources".parse::<Category>(), Ok(Category::DataSources));
        assert_eq!("functions".parse::<Category>(), Ok(Category::Functions));
        assert!("modules".parse::<Category>().is_err());
    }
}
