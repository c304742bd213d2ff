//! Selection tracking and ancestry resolution.
//!
//! [`resolve`] walks parent links from a selected node up to the root to find
//! the owning provider and category. [`SelectionContext`] remembers the last
//! tree pick together with the revision of the tree it was taken from. Node ids
//! are never reused across trees: after a rebuild the pick is looked up again
//! by provider, category and item, and only a pick with no counterpart in the
//! new tree is stale.

use tracing::debug;

use crate::tree::{Category, NavigationTree, NodeId, NodeKind};

/// Provider, category and (optionally) item a node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub provider: String,
    pub category: Category,
    /// `None` when a category node itself was selected.
    pub item: Option<String>,
}

/// Resolve the ancestry of `node`.
///
/// An item resolves through exactly three hops to the root
/// (item → category → provider → root), a category node through two.
/// Anything else (root, provider, unknown id, malformed ancestry) resolves to
/// `None`, which callers render as "no details available".
pub fn resolve(tree: &NavigationTree, node: NodeId) -> Option<ResolvedSelection> {
    // node plus at most three ancestors
    let mut chain = Vec::with_capacity(4);
    let mut cursor = Some(node);
    while let Some(id) = cursor {
        if chain.len() == 4 {
            return None;
        }
        let n = tree.node(id)?;
        chain.push(n);
        cursor = n.parent;
    }

    let (top, path) = chain.split_last()?;
    if top.kind != NodeKind::Root {
        return None;
    }

    match path {
        [item, category, provider] => match (item.kind, category.kind, provider.kind) {
            (NodeKind::Item, NodeKind::Category(c), NodeKind::Provider) => Some(ResolvedSelection {
                provider: provider.label.clone(),
                category: c,
                item: Some(item.label.clone()),
            }),
            _ => None,
        },
        [category, provider] => match (category.kind, provider.kind) {
            (NodeKind::Category(c), NodeKind::Provider) => Some(ResolvedSelection {
                provider: provider.label.clone(),
                category: c,
                item: None,
            }),
            _ => None,
        },
        _ => None,
    }
}

/// A node id tagged with the revision of the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    pub revision: u64,
    pub node: NodeId,
}

/// Selection lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Unselected,
    ItemSelected,
    /// A field was picked from the list; repeated picks stay here.
    FieldFocused(String),
}

/// Most recent tree selection, owned by the controller.
///
/// Updated only by explicit selection events. Rebuilding the tree leaves it
/// untouched; [`SelectionContext::resolve_current`] moves it onto the new tree
/// when the same item is still shown there.
#[derive(Debug, Clone)]
pub struct SelectionContext {
    current: Option<NodeRef>,
    resolved: Option<ResolvedSelection>,
    state: SelectionState,
}

impl Default for SelectionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionContext {
    pub fn new() -> Self {
        Self {
            current: None,
            resolved: None,
            state: SelectionState::Unselected,
        }
    }

    /// Record a tree pick. Any tree pick, resolvable or not, moves the state
    /// to [`SelectionState::ItemSelected`].
    pub fn select(&mut self, node: NodeRef, resolved: Option<ResolvedSelection>) {
        self.current = Some(node);
        self.resolved = resolved;
        self.state = SelectionState::ItemSelected;
    }

    /// Record a field pick. Ignored while nothing is selected.
    pub fn focus_field(&mut self, field: &str) -> bool {
        if self.state == SelectionState::Unselected {
            return false;
        }
        self.state = SelectionState::FieldFocused(field.to_string());
        true
    }

    pub fn current(&self) -> Option<NodeRef> {
        self.current
    }

    /// Resolution captured when the node was picked.
    pub fn resolved(&self) -> Option<&ResolvedSelection> {
        self.resolved.as_ref()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Node of the selection in the tree at `revision`.
    ///
    /// A pick from an older tree is found again through its captured
    /// resolution. Picks that never resolved (root, provider) cannot be
    /// carried over.
    pub fn locate(&self, tree: &NavigationTree, revision: u64) -> Option<NodeId> {
        let current = self.current?;
        if current.revision == revision {
            return Some(current.node);
        }
        let resolved = self.resolved.as_ref()?;
        tree.find(&resolved.provider, Some(resolved.category), resolved.item.as_deref())
    }

    /// True when there is a selection but no node for it in the tree at `revision`.
    pub fn is_stale(&self, tree: &NavigationTree, revision: u64) -> bool {
        self.current.is_some() && self.locate(tree, revision).is_none()
    }

    /// Re-resolve the selection against the displayed tree, re-tagging it
    /// with `revision` when it was found in a rebuilt tree.
    pub fn resolve_current(
        &mut self,
        tree: &NavigationTree,
        revision: u64,
    ) -> Option<ResolvedSelection> {
        let current = self.current?;
        let Some(node) = self.locate(tree, revision) else {
            debug!(
                selected = current.revision,
                displayed = revision,
                "selection is stale"
            );
            return None;
        };

        if current.revision != revision {
            debug!(revision, "selection carried over to rebuilt tree");
            self.current = Some(NodeRef { revision, node });
        }
        resolve(tree, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Query, SearchIndex};
    use crate::test_support::sample_schema;
    use terradex_shared::SchemaModel;

    fn tree() -> NavigationTree {
        NavigationTree::build(&sample_schema(), None)
    }

    fn filtered(schema: &SchemaModel, query: &str) -> NavigationTree {
        let query = Query::parse(query).unwrap();
        NavigationTree::build(schema, Some(&SearchIndex::new(schema).matches(&query)))
    }

    #[test]
    fn item_resolves_to_provider_and_category() {
        let tree = tree();
        let node = tree
            .find("aws", Some(Category::DataSources), Some("aws_ami"))
            .unwrap();
        assert_eq!(
            resolve(&tree, node),
            Some(ResolvedSelection {
                provider: "aws".into(),
                category: Category::DataSources,
                item: Some("aws_ami".into()),
            })
        );
    }

    #[test]
    fn category_node_resolves_without_item() {
        let tree = tree();
        let node = tree.find("aws", Some(Category::Functions), None).unwrap();
        let resolved = resolve(&tree, node).unwrap();
        assert_eq!(resolved.category, Category::Functions);
        assert_eq!(resolved.item, None);
    }

    #[test]
    fn root_and_provider_do_not_resolve() {
        let tree = tree();
        assert_eq!(resolve(&tree, tree.root()), None);
        let provider = tree.find("google", None, None).unwrap();
        assert_eq!(resolve(&tree, provider), None);
    }

    #[test]
    fn foreign_node_id_does_not_resolve() {
        let big = tree();
        let small = NavigationTree::empty();
        let leaf = big
            .find("google", Some(Category::Resources), Some("compute_network"))
            .unwrap();
        assert_eq!(resolve(&small, leaf), None);
    }

    #[test]
    fn state_machine_transitions() {
        let tree = tree();
        let node = tree
            .find("aws", Some(Category::Resources), Some("aws_instance"))
            .unwrap();
        let mut ctx = SelectionContext::new();
        assert_eq!(ctx.state(), &SelectionState::Unselected);
        assert!(!ctx.focus_field("instance_type"));
        assert_eq!(ctx.state(), &SelectionState::Unselected);

        ctx.select(NodeRef { revision: 0, node }, resolve(&tree, node));
        assert_eq!(ctx.state(), &SelectionState::ItemSelected);

        assert!(ctx.focus_field("instance_type"));
        assert!(ctx.focus_field("instance_type"));
        assert_eq!(
            ctx.state(),
            &SelectionState::FieldFocused("instance_type".into())
        );

        ctx.select(NodeRef { revision: 0, node: tree.root() }, None);
        assert_eq!(ctx.state(), &SelectionState::ItemSelected);
        assert_eq!(ctx.resolved(), None);
    }

    #[test]
    fn selection_absent_from_rebuilt_tree_is_stale() {
        let schema = sample_schema();
        let full = NavigationTree::build(&schema, None);
        let node = full
            .find("aws", Some(Category::Resources), Some("aws_instance"))
            .unwrap();
        let mut ctx = SelectionContext::new();
        ctx.select(NodeRef { revision: 3, node }, resolve(&full, node));
        assert!(!ctx.is_stale(&full, 3));

        let network = filtered(&schema, "network");
        assert!(ctx.is_stale(&network, 4));
        assert_eq!(ctx.resolve_current(&network, 4), None);
        // the pick itself is untouched
        assert_eq!(ctx.current(), Some(NodeRef { revision: 3, node }));
        assert!(ctx.resolved().is_some());
    }

    #[test]
    fn selection_present_in_rebuilt_tree_moves_over() {
        let schema = sample_schema();
        let full = NavigationTree::build(&schema, None);
        let node = full
            .find("aws", Some(Category::Resources), Some("aws_instance"))
            .unwrap();
        let mut ctx = SelectionContext::new();
        ctx.select(NodeRef { revision: 0, node }, resolve(&full, node));

        let inst = filtered(&schema, "inst");
        let moved = inst
            .find("aws", Some(Category::Resources), Some("aws_instance"))
            .unwrap();
        assert!(!ctx.is_stale(&inst, 1));
        assert_eq!(ctx.locate(&inst, 1), Some(moved));
        assert_eq!(ctx.resolve_current(&inst, 1), resolve(&full, node));
        assert_eq!(ctx.current(), Some(NodeRef { revision: 1, node: moved }));
    }

    #[test]
    fn unresolved_pick_does_not_carry_over() {
        let full = tree();
        let mut ctx = SelectionContext::new();
        ctx.select(NodeRef { revision: 0, node: full.root() }, None);
        assert!(!ctx.is_stale(&full, 0));
        assert!(ctx.is_stale(&full, 1));
        assert_eq!(ctx.resolve_current(&full, 1), None);
    }
}
