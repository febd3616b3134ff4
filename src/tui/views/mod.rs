// Views module - screen-level rendering logic
//
// Each view is a full-screen experience within the TUI:
// - Dashboard: summary cards, endpoint table, status chart, daily trend
// - Plans: plan cards plus the checkout confirmation step
// - Help: keybindings and a short usage guide
//
// This module owns the shell layout (title bar, content, optional logs
// panel, status bar) and dispatches the content slot to the current view.
// Overlays (toast, API key modal) render last so they sit on top.

mod dashboard;
mod help;
mod plans;

use super::app::{App, View};
use super::components::{api_key_modal, logs_panel, status_bar};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Theme background for the whole frame
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(1), Constraint::Min(10)];
    if app.show_logs {
        constraints.push(Constraint::Length(10));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_title_bar(f, chunks[0], app);

    match app.view {
        View::Dashboard => dashboard::render(f, chunks[1], app),
        View::Plans => plans::render(f, chunks[1], app),
        View::Help => help::render(f, chunks[1], app),
    }

    if app.show_logs {
        logs_panel::render(f, chunks[2], app);
    }
    status_bar::render(f, chunks[chunks.len() - 1], app);

    // Overlays
    if app.show_api_key {
        api_key_modal::render(f, f.area(), app);
    }
    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

/// Title bar: app name on the left, view tabs on the right
fn render_title_bar(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let theme = &app.theme;

    let mut spans = vec![
        Span::styled(
            " Reqlytics ",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled("· API usage analytics", Style::default().fg(theme.muted)),
        Span::raw("   "),
    ];

    for (index, view) in [View::Dashboard, View::Plans, View::Help].into_iter().enumerate() {
        let label = format!(" {}│{} ", index + 1, view.name());
        let style = if app.view == view {
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(label, style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
