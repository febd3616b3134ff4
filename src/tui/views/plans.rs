// Plans view
//
// One card per plan with price and features; the cursor starts on the
// current plan. Picking a paid plan opens the checkout confirmation step in
// place of the cards; the free plan changes directly.

use crate::session::plan::Plan;
use crate::tui::app::{App, PendingCheckout};
use crate::tui::components::format_amount;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the plans content area
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if let Some(pending) = &app.checkout {
        render_checkout_step(f, area, app, pending);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(1),
        ])
        .split(area);

    render_heading(f, chunks[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[1]);

    let current = app.controller.plan_state().plan();
    for (index, plan) in Plan::all().iter().enumerate() {
        render_plan_card(
            f,
            columns[index],
            app,
            *plan,
            *plan == current,
            index == app.selected_plan,
        );
    }

    let hint = Paragraph::new("←/→ select · Enter choose · Esc back to dashboard")
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.muted));
    f.render_widget(hint, chunks[2]);
}

fn render_heading(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::styled(
            "Choose Your Plan",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Upgrade your plan to unlock more features and higher limits",
            Style::default().fg(app.theme.muted),
        ),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_plan_card(
    f: &mut Frame,
    area: Rect,
    app: &App,
    plan: Plan,
    is_current: bool,
    is_selected: bool,
) {
    let theme = &app.theme;
    let info = plan.info();

    let border_style = if is_selected {
        Style::default().fg(theme.highlight)
    } else {
        Style::default().fg(theme.border)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", info.name))
        .title_style(
            Style::default()
                .fg(if is_selected { theme.highlight } else { theme.foreground })
                .add_modifier(Modifier::BOLD),
        );
    if is_selected {
        block = block.style(Style::default().bg(theme.selected_bg));
    }
    if info.popular {
        block = block.title_top(
            Line::styled(" ★ Most Popular ", Style::default().fg(theme.warning))
                .right_aligned(),
        );
    }

    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            format!("{}{}", info.price, info.period),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];
    for feature in info.features {
        lines.push(Line::styled(
            format!("✓ {}", feature),
            Style::default().fg(theme.muted),
        ));
    }
    lines.push(Line::raw(""));
    if is_current {
        lines.push(Line::styled(
            "Current Plan",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ));
    } else if is_selected {
        let action = if plan.is_paid() {
            "Enter: continue to payment"
        } else {
            "Enter: switch to this plan"
        };
        lines.push(Line::styled(action, Style::default().fg(theme.selected_fg)));
    }

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(card, area);
}

/// The checkout confirmation step shown for paid plans
fn render_checkout_step(f: &mut Frame, area: Rect, app: &App, pending: &PendingCheckout) {
    let theme = &app.theme;
    let request = &pending.request;
    let info = request.plan.info();

    let width = 60.min(area.width.saturating_sub(4));
    let height = 12.min(area.height);
    let card_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .title(" Choose Payment Method ")
        .title_style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));

    let lines = vec![
        Line::raw(""),
        Line::styled(
            format!("Upgrading to {} plan - {}{}", info.name, info.price, info.period),
            Style::default().fg(theme.foreground),
        ),
        Line::styled(
            format!(
                "{} charged now via Paystack",
                format_amount(request.amount, &request.currency)
            ),
            Style::default().fg(theme.muted),
        ),
        Line::styled(
            format!("Receipt goes to {}", request.email),
            Style::default().fg(theme.muted),
        ),
        Line::raw(""),
        Line::styled(
            "[Enter] Pay with Paystack",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ),
        Line::styled("Stripe (coming soon)", Style::default().fg(theme.muted)),
        Line::raw(""),
        Line::styled("[Esc] Cancel", Style::default().fg(theme.muted)),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(card, card_area);
}
