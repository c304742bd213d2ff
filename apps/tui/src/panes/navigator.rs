//! Navigator pane: the provider/category/item tree.

use std::collections::HashSet;

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState};
use terradex_core::{NavigationTree, NodeId};

use crate::widgets::pane_block;

/// Result of a key press in the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigatorAction {
    None,
    Select(NodeId),
}

pub(crate) struct NavigatorPane {
    expanded: HashSet<NodeId>,
    /// Index into the visible rows.
    cursor: usize,
}

impl NavigatorPane {
    pub(crate) fn new(tree: &NavigationTree) -> Self {
        let mut pane = Self {
            expanded: HashSet::new(),
            cursor: 0,
        };
        pane.reset(tree, false);
        pane
    }

    /// Forget expansion and cursor after the tree was replaced. Only the root
    /// starts expanded unless `expand_all` is set.
    pub(crate) fn reset(&mut self, tree: &NavigationTree, expand_all: bool) {
        self.expanded.clear();
        self.expanded.insert(tree.root());
        if expand_all {
            self.expanded.extend(tree.branch_ids());
        }
        self.cursor = 0;
    }

    fn rows(&self, tree: &NavigationTree) -> Vec<terradex_core::TreeRow> {
        tree.visible_rows(|id| self.expanded.contains(&id))
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, tree: &NavigationTree) -> NavigatorAction {
        let rows = self.rows(tree);
        if rows.is_empty() {
            return NavigatorAction::None;
        }
        self.cursor = self.cursor.min(rows.len() - 1);
        let current = rows[self.cursor].id;

        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < rows.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = rows.len() - 1,
            KeyCode::Right | KeyCode::Char('l') => {
                if !tree.children(current).is_empty() {
                    self.expanded.insert(current);
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.expanded.contains(&current) && !tree.children(current).is_empty() {
                    self.expanded.remove(&current);
                } else if let Some(parent) = tree.parent(current) {
                    if let Some(pos) = rows.iter().position(|r| r.id == parent) {
                        self.cursor = pos;
                    }
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if !tree.children(current).is_empty() && !self.expanded.remove(&current) {
                    self.expanded.insert(current);
                }
                return NavigatorAction::Select(current);
            }
            _ => {}
        }

        NavigatorAction::None
    }

    pub(crate) fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        tree: &NavigationTree,
        selected: Option<NodeId>,
        focused: bool,
    ) {
        let rows = self.rows(tree);
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let marker = if tree.children(row.id).is_empty() {
                    "  "
                } else if self.expanded.contains(&row.id) {
                    "▾ "
                } else {
                    "▸ "
                };
                let style = if Some(row.id) == selected {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!(
                    "{}{marker}{}",
                    "  ".repeat(row.depth),
                    tree.label(row.id)
                ))
                .style(style)
            })
            .collect();

        let list = List::new(items)
            .block(pane_block("schemas", focused))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED),
            );

        let cursor = self.cursor.min(rows.len().saturating_sub(1));
        let mut state = ListState::default().with_selected(Some(cursor));
        f.render_stateful_widget(list, area, &mut state);
    }

    #[cfg(test)]
    pub(crate) fn cursor_label<'a>(&self, tree: &'a NavigationTree) -> &'a str {
        self.rows(tree)
            .get(self.cursor)
            .map(|r| tree.label(r.id))
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terradex_core::parse_schema_document;

    fn tree() -> NavigationTree {
        let schema = parse_schema_document(
            r#"{"format_version": "1.0", "provider_schemas": {
                "aws": {"resource_schemas": {
                    "aws_instance": {"block": {}},
                    "aws_vpc": {"block": {}}
                }},
                "null": {"data_source_schemas": {"null_data_source": {"block": {}}}}
            }}"#,
        )
        .unwrap();
        NavigationTree::build(&schema, None)
    }

    #[test]
    fn starts_with_providers_collapsed() {
        let tree = tree();
        let pane = NavigatorPane::new(&tree);
        assert_eq!(pane.rows(&tree).len(), 3);
        assert_eq!(pane.cursor_label(&tree), "Providers");
    }

    #[test]
    fn expand_and_select_leaf() {
        let tree = tree();
        let mut pane = NavigatorPane::new(&tree);

        pane.handle_key(KeyCode::Down, &tree);
        assert_eq!(pane.cursor_label(&tree), "aws");
        pane.handle_key(KeyCode::Right, &tree);
        pane.handle_key(KeyCode::Down, &tree);
        assert_eq!(pane.cursor_label(&tree), "Resources");
        pane.handle_key(KeyCode::Enter, &tree);
        pane.handle_key(KeyCode::Down, &tree);

        let action = pane.handle_key(KeyCode::Enter, &tree);
        let NavigatorAction::Select(id) = action else {
            panic!("expected a selection");
        };
        assert_eq!(tree.label(id), "aws_instance");
    }

    #[test]
    fn left_on_leaf_jumps_to_parent() {
        let tree = tree();
        let mut pane = NavigatorPane::new(&tree);
        pane.reset(&tree, true);

        for _ in 0..3 {
            pane.handle_key(KeyCode::Down, &tree);
        }
        assert_eq!(pane.cursor_label(&tree), "aws_instance");
        pane.handle_key(KeyCode::Left, &tree);
        assert_eq!(pane.cursor_label(&tree), "Resources");
        pane.handle_key(KeyCode::Left, &tree);
        assert_eq!(pane.rows(&tree).len(), 6);
    }

    #[test]
    fn enter_on_branch_toggles_and_selects() {
        let tree = tree();
        let mut pane = NavigatorPane::new(&tree);
        pane.handle_key(KeyCode::Down, &tree);

        assert!(matches!(pane.handle_key(KeyCode::Enter, &tree), NavigatorAction::Select(_)));
        assert_eq!(pane.rows(&tree).len(), 4);
        pane.handle_key(KeyCode::Enter, &tree);
        assert_eq!(pane.rows(&tree).len(), 3);
    }
}
