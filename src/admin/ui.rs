use crate::app::App;
use crate::ui::Layout;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Staff Dashboard ")
        .title_style(app.theme.primary_style());

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    if !app.login.signed_in() {
        frame.render_widget(
            Paragraph::new("Sign in to manage bookings (:login)")
                .style(app.theme.muted_style())
                .alignment(Alignment::Center),
            Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1),
        );
        return;
    }

    if inner.height < 4 {
        return;
    }

    let header = format!(
        " {:<4} {:<11} {:<6} {:<10} {:<22} {}",
        "ID", "Date", "Time", "Plate", "Service", "Status"
    );
    frame.render_widget(
        Paragraph::new(header).style(app.theme.muted_style().add_modifier(Modifier::BOLD)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    if app.dashboard.bookings.is_empty() {
        let text = if app.dashboard.loaded {
            "No bookings yet."
        } else {
            "Loading... (r to refresh)"
        };
        frame.render_widget(
            Paragraph::new(text).style(app.theme.muted_style()),
            Rect::new(inner.x + 1, inner.y + 2, inner.width.saturating_sub(1), 1),
        );
        return;
    }

    for (idx, booking) in app.dashboard.bookings.iter().enumerate() {
        let y = inner.y + 1 + idx as u16;
        if y >= inner.y + inner.height {
            break;
        }

        let time = booking.booking_time.chars().take(5).collect::<String>();
        let line = format!(
            " {:<4} {:<11} {:<6} {:<10} {:<22} {}",
            booking.id,
            booking.booking_date,
            time,
            booking.license_plate,
            booking.service_type,
            booking.status
        );

        let style = if idx == app.dashboard.selected {
            app.theme.selection_style()
        } else {
            app.theme.style()
        };
        frame.render_widget(
            Paragraph::new(line).style(style),
            Rect::new(inner.x, y, inner.width, 1),
        );
    }

    if app.dashboard.show_status_picker {
        draw_status_picker(frame, area, app);
    }
}

fn draw_status_picker(frame: &mut Frame, area: Rect, app: &App) {
    let stages = &app.config.tracking.stages;

    let items: Vec<ListItem> = stages
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            let style = if i == app.dashboard.picker_cursor {
                app.theme.selection_style()
            } else {
                app.theme.style()
            };
            let marker = if i == app.dashboard.picker_cursor { ">" } else { " " };
            ListItem::new(format!("{marker} {stage}")).style(style)
        })
        .collect();

    let height = (items.len() as u16 + 2).min(area.height.saturating_sub(2)).max(5);
    let width = 40u16.min(area.width.saturating_sub(4));
    let picker_area = Layout::centered_box(area, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" New status (j/k, Enter to apply) ")
        .title_style(app.theme.primary_style());

    frame.render_widget(Clear, picker_area);

    let list = List::new(items).block(block);
    let mut state = ListState::default().with_selected(Some(app.dashboard.picker_cursor));

    frame.render_stateful_widget(list, picker_area, &mut state);
}
