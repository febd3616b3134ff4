// API key modal
//
// Centered overlay revealing the stored API key with a copy shortcut.

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the modal over the current view
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let api_key = app.controller.session().api_key;

    let width = (api_key.chars().count() as u16 + 6)
        .max(40)
        .min(area.width.saturating_sub(4));
    let modal_area = centered_rect(area, width, 7);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .style(Style::default().bg(theme.background))
        .title(" Your API Key ")
        .title_style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));

    let lines = vec![
        Line::raw(""),
        Line::styled(
            api_key,
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "Send this key in the x-api-key header of your requests",
            Style::default().fg(theme.muted),
        ),
        Line::styled("[y] copy · [Esc] close", Style::default().fg(theme.muted)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(Clear, modal_area);
    f.render_widget(paragraph, modal_area);
}

/// A rect of the given size centered in `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
