// Daily request trend
//
// Sparkline over the per-day request counts, newest day on the right.

use super::formatters::format_number;
use crate::stats::{short_day_label, StatsSnapshot};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Sparkline},
    Frame,
};

/// Render the daily trend sparkline
pub fn render(f: &mut Frame, area: Rect, snapshot: &StatsSnapshot, theme: &Theme) {
    let data: Vec<u64> = snapshot.daily.iter().map(|day| day.total).collect();
    let peak = data.iter().copied().max().unwrap_or(0);

    let title = match (snapshot.daily.first(), snapshot.daily.last()) {
        (Some(first), Some(last)) if snapshot.daily.len() > 1 => format!(
            " Daily Request Trend ({} – {}, peak {}) ",
            short_day_label(&first.day),
            short_day_label(&last.day),
            format_number(peak)
        ),
        (Some(only), _) => format!(" Daily Request Trend ({}) ", short_day_label(&only.day)),
        _ => " Daily Request Trend ".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(title)
                .title_style(Style::default().fg(theme.title)),
        )
        .data(&data)
        .style(Style::default().fg(theme.highlight));

    f.render_widget(sparkline, area);
}
