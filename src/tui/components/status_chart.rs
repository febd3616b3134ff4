// Request status breakdown
//
// Horizontal bars for successful vs server-error vs client-error requests,
// the terminal stand-in for the web dashboard's status pie chart.

use super::formatters::format_compact_number;
use crate::stats::StatsSnapshot;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Direction, Rect},
    style::Style,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

/// Render the request status bar chart
pub fn render(f: &mut Frame, area: Rect, snapshot: &StatsSnapshot, theme: &Theme) {
    let breakdown = snapshot.status_breakdown();
    let colors = [theme.success, theme.error, theme.warning];

    let bars: Vec<Bar> = breakdown
        .iter()
        .zip(colors)
        .map(|(slice, color)| {
            Bar::default()
                .label(slice.name.into())
                .value(slice.value)
                .text_value(format_compact_number(slice.value))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme.background).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" Request Status ")
                .title_style(Style::default().fg(theme.title)),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}
