// Summary cards row
//
// Six headline metrics across the top of the dashboard. On narrow terminals
// the row wraps into two rows of three.

use super::formatters::format_number;
use crate::stats::StatsSnapshot;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

struct Card {
    title: &'static str,
    value: String,
    subtitle: String,
    color: Color,
}

/// Render the summary card row(s)
pub fn render(f: &mut Frame, area: Rect, snapshot: &StatsSnapshot, theme: &Theme) {
    let summary = &snapshot.summary;

    let cards = [
        Card {
            title: "Total Requests",
            value: format_number(summary.total_requests),
            subtitle: "all time".to_string(),
            color: theme.title,
        },
        Card {
            title: "Successful",
            value: format_number(snapshot.successful_requests()),
            subtitle: format!("{:.1}% success", snapshot.success_rate()),
            color: theme.success,
        },
        Card {
            title: "Avg Response",
            value: format!("{:.0} ms", summary.avg_response_time_ms),
            subtitle: "per request".to_string(),
            color: theme.highlight,
        },
        Card {
            title: "Server Errors",
            value: format_number(summary.server_errors),
            subtitle: "5xx responses".to_string(),
            color: if summary.server_errors > 0 {
                theme.error
            } else {
                theme.muted
            },
        },
        Card {
            title: "Client Errors",
            value: format_number(summary.client_errors),
            subtitle: "4xx responses".to_string(),
            color: if summary.client_errors > 0 {
                theme.warning
            } else {
                theme.muted
            },
        },
        Card {
            title: "Error Rate",
            value: format!("{:.1}%", snapshot.error_rate()),
            subtitle: "of all requests".to_string(),
            color: if snapshot.error_rate() > 5.0 {
                theme.error
            } else {
                theme.muted
            },
        },
    ];

    // Wide terminals fit all six side by side; narrow ones wrap to 2x3
    if area.height < 8 {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 6); 6])
            .split(area);
        for (card, column) in cards.iter().zip(columns.iter()) {
            render_card(f, *column, card, theme);
        }
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 2); 2])
            .split(area);
        for (chunk, row_area) in cards.chunks(3).zip(rows.iter()) {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(*row_area);
            for (card, column) in chunk.iter().zip(columns.iter()) {
                render_card(f, *column, card, theme);
            }
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &Card, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} ", card.title))
        .title_style(Style::default().fg(theme.muted));

    let lines = vec![
        Line::styled(
            card.value.clone(),
            Style::default().fg(card.color).add_modifier(Modifier::BOLD),
        ),
        Line::styled(card.subtitle.clone(), Style::default().fg(theme.muted)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}
