// Help view - keybindings and a short usage guide

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BINDINGS: &[(&str, &str)] = &[
    ("1 / d", "Dashboard"),
    ("2 / p", "Subscription plans"),
    ("3 / ?", "This help"),
    ("r", "Refresh dashboard data now"),
    ("n / b", "Page through the endpoint table"),
    ("←/→ Enter", "Pick a plan (Plans view)"),
    ("a", "Show API key"),
    ("y", "Copy API key (while shown)"),
    ("v", "Toggle the logs panel"),
    ("t", "Toggle theme"),
    ("L", "Log out"),
    ("q", "Quit"),
];

/// Render the help content area
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            "  Keybindings",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];

    for (keys, action) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(theme.highlight)),
            Span::styled(*action, Style::default().fg(theme.foreground)),
        ]));
    }

    lines.extend([
        Line::raw(""),
        Line::styled(
            "  Getting started",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "  Send requests with your API key in the x-api-key header; the",
            Style::default().fg(theme.muted),
        ),
        Line::styled(
            "  dashboard aggregates them within a few minutes. Stats refresh",
            Style::default().fg(theme.muted),
        ),
        Line::styled(
            "  automatically on the poll interval, or instantly with [r].",
            Style::default().fg(theme.muted),
        ),
        Line::styled(
            "  Manage credentials with `reqlytics login` and `reqlytics logout`.",
            Style::default().fg(theme.muted),
        ),
    ]);

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Help ")
            .title_style(Style::default().fg(theme.title)),
    );
    f.render_widget(help, area);
}
