use super::LookupState;
use crate::app::App;
use crate::ui::widgets::render_input_field;
use crate::vim::VimMode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Track Repair Status ")
        .title_style(app.theme.primary_style());

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    if inner.height < 5 {
        return;
    }

    let field_width = inner.width.saturating_sub(2);
    frame.render_widget(
        Paragraph::new("Phone number or email").style(app.theme.muted_style()),
        Rect::new(inner.x + 1, inner.y, field_width, 1),
    );

    let line = render_input_field(
        app.tracker.key.content(),
        app.tracker.key.cursor(),
        true,
        app.vim_mode == VimMode::Insert,
        &app.theme,
    );
    frame.render_widget(
        Paragraph::new(line),
        Rect::new(inner.x + 1, inner.y + 1, field_width, 1),
    );

    let result_area = Rect::new(
        inner.x + 1,
        inner.y + 3,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(3),
    );
    draw_result(frame, result_area, app);
}

fn draw_result(frame: &mut Frame, area: Rect, app: &App) {
    match &app.tracker.state {
        LookupState::Idle => {
            frame.render_widget(
                Paragraph::new("Press Enter to look up the latest booking.")
                    .style(app.theme.muted_style()),
                Rect::new(area.x, area.y, area.width, 1),
            );
        }
        LookupState::MissingKey => {
            frame.render_widget(
                Paragraph::new("Enter a phone number or email")
                    .style(app.theme.error_style().add_modifier(Modifier::BOLD)),
                Rect::new(area.x, area.y, area.width, 1),
            );
        }
        LookupState::Searching => {
            frame.render_widget(
                Paragraph::new("Checking status...").style(app.theme.style()),
                Rect::new(area.x, area.y, area.width, 1),
            );
        }
        LookupState::NotFound { key } => {
            frame.render_widget(
                Paragraph::new(format!(
                    "No booking found for {key}. Check the phone number or email."
                ))
                .style(app.theme.error_style().add_modifier(Modifier::BOLD)),
                Rect::new(area.x, area.y, area.width, 1),
            );
            // No timeline in the failure case
        }
        LookupState::Found { record, timeline } => {
            let rows = [
                ("Customer", record.fullname.clone()),
                ("Booked for", record.booking_date.clone()),
                ("License plate", record.license_plate.clone()),
                ("Service", record.service_type.clone()),
            ];
            let mut y = area.y;
            for (label, value) in rows {
                if y >= area.y + area.height {
                    return;
                }
                let line = Line::from(vec![
                    Span::styled(format!("{label:<15}"), app.theme.muted_style()),
                    Span::styled(value, app.theme.style()),
                ]);
                frame.render_widget(Paragraph::new(line), Rect::new(area.x, y, area.width, 1));
                y += 1;
            }

            if y < area.y + area.height {
                let line = Line::from(vec![
                    Span::styled("Current status ", app.theme.muted_style()),
                    Span::styled(
                        record.status.clone(),
                        app.theme.primary_style().add_modifier(Modifier::BOLD),
                    ),
                ]);
                frame.render_widget(Paragraph::new(line), Rect::new(area.x, y, area.width, 1));
                y += 2;
            }

            draw_timeline(frame, Rect::new(area.x, y, area.width, area.height.saturating_sub(y - area.y)), app, timeline);
        }
    }
}

/// Vertical timeline: one row per stage, a connector row per edge. The
/// completed path is lit up to the current stage.
fn draw_timeline(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    timeline: &super::Timeline,
) {
    let mut y = area.y;
    let last = timeline.stages.len().saturating_sub(1);

    for (idx, stage) in timeline.stages.iter().enumerate() {
        if y >= area.y + area.height {
            return;
        }

        let mark = if stage.reached { "[x]" } else { "[ ]" };
        let style = if stage.current {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else if stage.reached {
            app.theme.secondary_style()
        } else {
            app.theme.muted_style()
        };
        frame.render_widget(
            Paragraph::new(format!(" {mark} {}", stage.name)).style(style),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;

        if idx < last {
            if y >= area.y + area.height {
                return;
            }
            let edge_style = if stage.edge_reached {
                app.theme.secondary_style()
            } else {
                app.theme.muted_style()
            };
            frame.render_widget(
                Paragraph::new("  │").style(edge_style),
                Rect::new(area.x, y, area.width, 1),
            );
            y += 1;
        }
    }
}
