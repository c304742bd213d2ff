//! Navigation, search and detail rendering for terradex.
//!
//! This crate turns a parsed provider catalog into what the browser shows:
//! - [`tree`] builds the provider/category/item hierarchy, filtered or not
//! - [`search`] matches a substring query against every name
//! - [`selection`] resolves a picked node to its provider and category
//! - [`detail`] renders the field list and detail document for a selection
//! - [`anchor`] maps a field pick to a heading in that document
//! - [`browser`] ties the above together behind the three input events
//! - [`loader`] reads the catalog from a file or the `tofu` CLI

pub mod anchor;
pub mod browser;
pub mod detail;
pub mod loader;
pub mod search;
pub mod selection;
pub mod tree;

#[cfg(test)]
mod test_support;

pub use anchor::{AnchorTarget, anchor_for, resolve_anchor};
pub use browser::{Browser, QueryOutcome};
pub use detail::{Content, Detail, DetailDocument, Section, Table, render, render_selection};
pub use loader::{load_schema, parse_schema_document};
pub use search::{MatchSet, ProviderMatches, Query, SearchIndex, find_matches};
pub use selection::{NodeRef, ResolvedSelection, SelectionContext, SelectionState, resolve};
pub use tree::{Category, NavNode, NavigationTree, NodeId, NodeKind, TreeRow};
