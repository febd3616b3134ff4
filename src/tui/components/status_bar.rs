// Status bar component
//
// Bottom line of every view: plan badge, poll countdown, uptime, version.

use crate::config::VERSION;
use crate::tui::app::{plan_badge, App};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let plan_state = app.controller.plan_state();

    let badge_style = if plan_state.is_confirmed() {
        Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.syncing).add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(plan_badge(plan_state), badge_style),
    ];

    if app.controller.is_changing_plan() {
        spans.push(Span::styled(
            "  changing plan…",
            Style::default().fg(theme.syncing),
        ));
    }

    if let Some(snapshot) = &app.stats {
        spans.push(Span::styled(
            format!(
                "  │  updated {}",
                snapshot
                    .fetched_at
                    .with_timezone(&chrono::Local)
                    .format("%H:%M:%S")
            ),
            Style::default().fg(theme.status_bar),
        ));
    }
    spans.push(Span::styled(
        format!("  │  next poll in {}s", app.seconds_until_poll()),
        Style::default().fg(theme.status_bar),
    ));
    spans.push(Span::styled(
        format!("  │  up {}", app.uptime()),
        Style::default().fg(theme.status_bar),
    ));
    spans.push(Span::styled(
        format!("  │  v{}  │  [?] help  [q] quit", VERSION),
        Style::default().fg(theme.status_bar),
    ));

    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.border)));

    f.render_widget(status, area);
}
