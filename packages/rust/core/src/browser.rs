//! Top-level browsing controller.
//!
//! [`Browser`] owns the schema and everything derived from it, and turns the
//! three input events (query change, tree selection, field pick) into the
//! outputs the presentation layer draws: the displayed tree, the field list,
//! the detail document and an anchor to scroll to.
//!
//! Every operation runs to completion on the caller's thread. The schema is
//! never written after construction.

use tracing::{debug, info, instrument};

use terradex_shared::SchemaModel;

use crate::anchor::{AnchorTarget, resolve_anchor};
use crate::detail::{Detail, render_selection};
use crate::search::{MatchSet, Query, SearchIndex};
use crate::selection::{self, NodeRef, SelectionContext, SelectionState};
use crate::tree::{NavigationTree, NodeId};

/// What a query change did to the displayed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Blank query: the unfiltered tree is back.
    Restored,
    /// A filtered tree replaced the displayed one.
    Filtered { items: usize },
}

/// Browsing session over one schema.
#[derive(Debug)]
pub struct Browser {
    schema: SchemaModel,
    index: SearchIndex,
    baseline: NavigationTree,
    tree: NavigationTree,
    /// Bumped whenever `tree` is replaced.
    revision: u64,
    query: Option<Query>,
    matches: Option<MatchSet>,
    selection: SelectionContext,
    detail: Detail,
    anchor: Option<AnchorTarget>,
}

impl Browser {
    #[instrument(
        skip_all,
        fields(providers = schema.provider_count(), items = schema.item_count())
    )]
    pub fn new(schema: SchemaModel) -> Self {
        let index = SearchIndex::new(&schema);
        let baseline = NavigationTree::build(&schema, None);
        info!(nodes = baseline.len(), "browser ready");

        Self {
            tree: baseline.clone(),
            schema,
            index,
            baseline,
            revision: 0,
            query: None,
            matches: None,
            selection: SelectionContext::new(),
            detail: Detail::none(),
            anchor: None,
        }
    }

    pub fn schema(&self) -> &SchemaModel {
        &self.schema
    }

    /// The tree currently displayed.
    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    /// The unfiltered tree built at load time.
    pub fn baseline(&self) -> &NavigationTree {
        &self.baseline
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Active (folded) query, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_ref().map(Query::as_str)
    }

    /// Matches behind the displayed tree, if it is filtered.
    pub fn matches(&self) -> Option<&MatchSet> {
        self.matches.as_ref()
    }

    pub fn selection(&self) -> &SelectionContext {
        &self.selection
    }

    pub fn detail(&self) -> &Detail {
        &self.detail
    }

    /// Last successful field-pick target, cleared by a new tree selection.
    pub fn anchor(&self) -> Option<&AnchorTarget> {
        self.anchor.as_ref()
    }

    /// Query-change event.
    ///
    /// A blank query restores the baseline tree; anything else rebuilds a
    /// filtered tree. The selection is left as it is; it becomes stale only
    /// if the new tree no longer shows the selected item.
    pub fn set_query(&mut self, raw: &str) -> QueryOutcome {
        self.revision += 1;

        let Some(query) = Query::parse(raw) else {
            debug!(revision = self.revision, "query cleared, restoring baseline tree");
            self.query = None;
            self.matches = None;
            self.tree = self.baseline.clone();
            return QueryOutcome::Restored;
        };

        let matches = self.index.matches(&query);
        let items = matches.item_count();
        self.tree = NavigationTree::build(&self.schema, Some(&matches));
        debug!(query = query.as_str(), items, revision = self.revision, "tree filtered");

        self.query = Some(query);
        self.matches = Some(matches);
        QueryOutcome::Filtered { items }
    }

    /// Tree selection event: resolve ancestry and render the detail.
    pub fn select(&mut self, node: NodeId) -> &Detail {
        let resolved = selection::resolve(&self.tree, node);
        debug!(
            label = self.tree.label(node),
            resolved = ?resolved,
            "tree node selected"
        );

        self.detail = render_selection(&self.schema, resolved.as_ref());
        self.selection.select(
            NodeRef {
                revision: self.revision,
                node,
            },
            resolved,
        );
        self.anchor = None;
        &self.detail
    }

    /// Field pick event.
    ///
    /// On success the selection moves to `FieldFocused` and the target is
    /// returned. When nothing is selected or the anchor is not in the current
    /// document, nothing changes and `None` is returned.
    pub fn pick_field(&mut self, field: &str) -> Option<&AnchorTarget> {
        if *self.selection.state() == SelectionState::Unselected {
            debug!(field, "field pick ignored, nothing selected");
            return None;
        }

        let target = resolve_anchor(&self.detail.document, field)?;
        self.selection.focus_field(field);
        self.anchor = Some(target);
        self.anchor.as_ref()
    }

    /// Re-render the detail for the current selection against the displayed
    /// tree. A selection still shown there is carried over to it; a stale one
    /// renders the "no details" document.
    pub fn refresh(&mut self) -> &Detail {
        let resolved = self.selection.resolve_current(&self.tree, self.revision);
        self.detail = render_selection(&self.schema, resolved.as_ref());
        self.anchor = match self.selection.state() {
            SelectionState::FieldFocused(field) => resolve_anchor(&self.detail.document, field),
            _ => None,
        };
        &self.detail
    }

    /// True when the selected item is not in the displayed tree.
    pub fn selection_is_stale(&self) -> bool {
        self.selection.is_stale(&self.tree, self.revision)
    }

    /// Node of the current selection in the displayed tree, if it is there.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.selection.locate(&self.tree, self.revision)
    }
}
