//! Core TUI application state and event loop.

use std::io;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use terradex_core::{Browser, NodeId, QueryOutcome};
use terradex_shared::UiConfig;
use tracing::debug;

use crate::panes::{
    DetailsPane, FieldAction, FieldsPane, Focus, NavigatorAction, NavigatorPane, SearchAction,
    SearchPane,
};
use crate::widgets::status_bar;

/// Upper bound on how long one poll waits for input.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Application state.
pub(crate) struct App {
    pub browser: Browser,
    pub ui: UiConfig,
    pub focus: Focus,
    pub navigator: NavigatorPane,
    pub search: SearchPane,
    pub fields: FieldsPane,
    pub details: DetailsPane,
    /// When the search text last changed without being applied.
    pub pending_query: Option<Instant>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

impl App {
    pub(crate) fn new(browser: Browser, ui: UiConfig, initial_query: Option<&str>) -> Self {
        let navigator = NavigatorPane::new(browser.tree());
        let details = DetailsPane::new(&browser.detail().document);
        let schema = browser.schema();
        let status = format!(
            "{} providers, {} items, press ? for help",
            schema.provider_count(),
            schema.item_count()
        );

        let mut app = Self {
            browser,
            ui,
            focus: Focus::Navigator,
            navigator,
            search: SearchPane::new(initial_query),
            fields: FieldsPane::new(),
            details,
            pending_query: None,
            should_quit: false,
            status,
            show_help: false,
        };
        if initial_query.is_some() {
            app.apply_query();
        }
        app
    }

    /// Query-change event: refilter the tree from the search text.
    pub(crate) fn apply_query(&mut self) {
        self.pending_query = None;
        let outcome = self.browser.set_query(self.search.text());
        let filtered = matches!(outcome, QueryOutcome::Filtered { .. });
        self.navigator
            .reset(self.browser.tree(), filtered && self.ui.expand_filtered);

        self.status = match outcome {
            QueryOutcome::Restored => "Filter cleared".to_string(),
            QueryOutcome::Filtered { items: 0 } => {
                format!("No matches for '{}'", self.search.text().trim())
            }
            QueryOutcome::Filtered { items } => {
                format!("{items} match(es) for '{}'", self.search.text().trim())
            }
        };
    }

    /// Apply a pending query once the debounce window has passed.
    pub(crate) fn tick(&mut self, now: Instant) {
        if let Some(since) = self.pending_query {
            if now.duration_since(since) >= Duration::from_millis(self.ui.search_debounce_ms) {
                self.apply_query();
            }
        }
    }

    /// Tree selection event.
    fn select_node(&mut self, node: NodeId) {
        let label = self.browser.tree().label(node).to_string();
        let detail = self.browser.select(node);
        let field_count = detail.field_names.len();
        self.details.set_document(&detail.document);
        self.fields.reset();

        self.status = if detail.is_none() {
            format!("{label}: no details")
        } else {
            format!("{label}: {field_count} field(s)")
        };
    }

    /// Re-render the details for the current selection against the
    /// displayed tree.
    fn refresh_details(&mut self) {
        let stale = self.browser.selection_is_stale();
        let detail = self.browser.refresh();
        self.details.set_document(&detail.document);
        self.fields.reset();
        if let Some(line) = self.browser.anchor().map(|a| a.line) {
            self.details.scroll_to(line);
        }

        self.status = if stale {
            "Selection is not in the current tree".to_string()
        } else {
            "Details refreshed".to_string()
        };
    }

    /// Field pick event.
    fn pick_field(&mut self, field: &str) {
        match self.browser.pick_field(field) {
            Some(target) => {
                let line = target.line;
                self.details.scroll_to(line);
                self.status = format!("#{}", target.token);
            }
            None => {
                debug!(field, "no anchor for field");
                self.status = format!("No section for '{field}' in details");
            }
        }
    }
}

/// Entry point: sets up terminal, runs event loop, restores terminal.
pub(crate) fn run(browser: Browser, ui: UiConfig, initial_query: Option<&str>) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(browser, ui, initial_query));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers);
                }
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

pub(crate) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let typing = app.focus == Focus::Search;

    // Global keybindings (always active)
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !typing => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') if !typing => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        KeyCode::Char('r') if !typing => {
            app.refresh_details();
            return;
        }
        KeyCode::Char('/') if !typing => {
            app.focus = Focus::Search;
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to focused pane
    match app.focus {
        Focus::Navigator => {
            if let NavigatorAction::Select(node) =
                app.navigator.handle_key(code, app.browser.tree())
            {
                app.select_node(node);
            }
        }
        Focus::Search => match app.search.handle_key(code, modifiers) {
            SearchAction::Edited => app.pending_query = Some(Instant::now()),
            SearchAction::Submit => {
                app.apply_query();
                app.focus = Focus::Navigator;
            }
            SearchAction::Leave => app.focus = Focus::Navigator,
            SearchAction::None => {}
        },
        Focus::Fields => {
            if let FieldAction::Pick(field) =
                app.fields.handle_key(code, &app.browser.detail().field_names)
            {
                app.pick_field(&field);
            }
        }
        Focus::Details => app.details.handle_key(code),
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(2, 6),
            Constraint::Ratio(1, 6),
            Constraint::Ratio(3, 6),
        ])
        .split(chunks[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Tree
            Constraint::Length(3), // Search input
        ])
        .split(columns[0]);

    let selected = app.browser.selected_node();

    app.navigator.draw(
        f,
        left[0],
        app.browser.tree(),
        selected,
        app.focus == Focus::Navigator,
    );
    app.search.draw(f, left[1], app.focus == Focus::Search);
    app.fields.draw(
        f,
        columns[1],
        &app.browser.detail().field_names,
        app.focus == Focus::Fields,
    );
    app.details.draw(f, columns[2], app.focus == Focus::Details);

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[1]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  Tab/S-Tab    Next/previous pane"),
        Line::from("  /            Search"),
        Line::from("  r            Refresh details"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Schemas:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓ j/k      Move"),
        Line::from("  ←/→ h/l      Collapse / expand"),
        Line::from("  Enter        Select node"),
        Line::from(""),
        Line::from("Search:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  Enter        Apply now"),
        Line::from("  Ctrl-U       Clear"),
        Line::from("  Esc          Back to schemas"),
        Line::from(""),
        Line::from("Attributes / Details:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓          Jump to field / scroll"),
        Line::from("  PgUp/PgDn    Scroll details"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (any key closes) ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
