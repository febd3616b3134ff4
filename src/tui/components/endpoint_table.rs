// Endpoint usage table
//
// Requests per endpoint with each endpoint's share of the total, paged five
// rows at a time like the web dashboard.

use super::formatters::{format_number, truncate_to_width};
use crate::stats::EndpointRow;
use crate::tui::app::ENDPOINT_PAGE_SIZE;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Render one page of the endpoint table
pub fn render(f: &mut Frame, area: Rect, rows: &[EndpointRow], page: usize, theme: &Theme) {
    let start = page * ENDPOINT_PAGE_SIZE;
    let end = (start + ENDPOINT_PAGE_SIZE).min(rows.len());
    let visible = rows.get(start..end).unwrap_or_default();

    let name_width = area.width.saturating_sub(26) as usize;

    let header = Row::new([
        Cell::from("Endpoint"),
        Cell::from("Requests"),
        Cell::from("% of Total"),
    ])
    .style(
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::BOLD),
    );

    let body = visible.iter().map(|row| {
        // Narrow tables drop the /api/ prefix to keep the interesting part
        let shown = if name_width < 24 {
            &row.name
        } else {
            &row.full_endpoint
        };
        Row::new([
            Cell::from(truncate_to_width(shown, name_width))
                .style(Style::default().fg(theme.foreground)),
            Cell::from(format_number(row.requests)).style(Style::default().fg(theme.highlight)),
            Cell::from(format!("{:.1}%", row.percentage))
                .style(Style::default().fg(theme.muted)),
        ])
    });

    let footer = if rows.is_empty() {
        " no traffic yet ".to_string()
    } else {
        format!(
            " Showing {}–{} of {} endpoints · [n]ext [b]ack ",
            start + 1,
            end,
            rows.len()
        )
    };

    let table = Table::new(
        body,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Endpoint Usage ")
            .title_style(Style::default().fg(theme.title))
            .title_bottom(footer),
    );

    f.render_widget(table, area);

    if rows.is_empty() {
        // Centered hint inside the empty table body
        let inner = Rect {
            x: area.x + 2,
            y: area.y + area.height / 2,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        let hint = Paragraph::new("No endpoint traffic in this period")
            .style(Style::default().fg(theme.muted));
        f.render_widget(hint, inner);
    }
}
