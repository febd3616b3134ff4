//! Logs panel component
//!
//! Renders the in-memory tracing buffer so logs are visible without tearing
//! the alternate screen. Toggled with `v`.

use crate::logging::LogLevel;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the most recent log entries that fit the panel
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let capacity = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(capacity);

    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Error => theme.error,
                LogLevel::Warn => theme.warning,
                LogLevel::Info => theme.highlight,
                LogLevel::Debug | LogLevel::Trace => theme.muted,
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    format!("{:<5} ", entry.level.as_str()),
                    Style::default().fg(level_color),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(theme.foreground)),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Logs ")
            .title_style(Style::default().fg(theme.title)),
    );

    f.render_widget(panel, area);
}
