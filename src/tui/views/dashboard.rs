// Dashboard view
//
// Three states, in precedence order:
// 1. Error: the latest poll failed - never present stale data as current
// 2. Loading: no snapshot yet
// 3. Data: summary cards, endpoint table + status chart, daily trend

use crate::tui::app::App;
use crate::tui::components::{daily_trend, endpoint_table, status_chart, summary_cards};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Render the dashboard content area
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if let Some(error) = &app.stats_error {
        render_error_state(f, area, app, error);
        return;
    }

    let Some(snapshot) = &app.stats else {
        render_loading_state(f, area, app);
        return;
    };

    // Narrow terminals get two rows of summary cards instead of one
    let cards_height = if area.width >= 100 { 4 } else { 8 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(cards_height),
            Constraint::Min(9),
            Constraint::Length(6),
        ])
        .split(area);

    summary_cards::render(f, chunks[0], snapshot, &app.theme);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    endpoint_table::render(
        f,
        middle[0],
        &snapshot.endpoint_rows(),
        app.endpoint_page,
        &app.theme,
    );
    status_chart::render(f, middle[1], snapshot, &app.theme);

    daily_trend::render(f, chunks[2], snapshot, &app.theme);
}

fn render_loading_state(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::raw(""),
        Line::styled(
            "Loading dashboard data...",
            Style::default().fg(app.theme.foreground),
        ),
        Line::styled(
            format!("polling every {}s", app.poll_interval.as_secs()),
            Style::default().fg(app.theme.muted),
        ),
    ];
    render_centered(f, area, lines);
}

fn render_error_state(f: &mut Frame, area: Rect, app: &App, error: &str) {
    let theme = &app.theme;
    let lines = vec![
        Line::raw(""),
        Line::styled(
            "Failed to load dashboard data",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ),
        Line::styled(error.to_string(), Style::default().fg(theme.muted)),
        Line::raw(""),
        Line::styled(
            "[r] retry now · [L] log out and sign in again · [q] quit",
            Style::default().fg(theme.muted),
        ),
    ];
    render_centered(f, area, lines);
}

fn render_centered(f: &mut Frame, area: Rect, lines: Vec<Line>) {
    let height = lines.len() as u16;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, y, area.width, height.min(area.height));
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}
