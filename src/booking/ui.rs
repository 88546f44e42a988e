use super::{CustomerForm, WizardStep, FIELD_COUNT};
use crate::app::App;
use crate::ui::widgets::render_input_field;
use crate::vim::VimMode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Book a Service ")
        .title_style(app.theme.primary_style());

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    if inner.height < 6 {
        return;
    }

    draw_step_indicator(
        frame,
        Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1),
        app,
    );

    let content = Rect::new(
        inner.x + 1,
        inner.y + 2,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(2),
    );

    match app.wizard.step {
        WizardStep::ServiceSelection => draw_service_selection(frame, content, app),
        WizardStep::CustomerForm => draw_customer_form(frame, content, app),
        WizardStep::Confirmation => draw_confirmation(frame, content, app),
    }
}

/// "[1] Service > [2] Details > [3] Confirm" with the current step lit up.
fn draw_step_indicator(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.wizard.step.index();
    let mut spans = Vec::new();

    for (idx, step) in [
        WizardStep::ServiceSelection,
        WizardStep::CustomerForm,
        WizardStep::Confirmation,
    ]
    .iter()
    .enumerate()
    {
        if idx > 0 {
            spans.push(Span::styled(" > ", app.theme.muted_style()));
        }
        let style = if idx == current {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else if idx < current {
            app.theme.secondary_style()
        } else {
            app.theme.muted_style()
        };
        spans.push(Span::styled(
            format!("[{}] {}", idx + 1, step.title()),
            style,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_service_selection(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = &app.wizard;

    frame.render_widget(
        Paragraph::new("What does the vehicle need?").style(app.theme.style()),
        Rect::new(area.x, area.y, area.width, 1),
    );

    for (idx, service) in wizard.services.iter().enumerate() {
        let y = area.y + 2 + idx as u16;
        if y >= area.y + area.height {
            break;
        }

        let mark = if wizard.selected == Some(idx) { "[x]" } else { "[ ]" };
        let style = if idx == wizard.cursor {
            app.theme.selection_style()
        } else if wizard.selected == Some(idx) {
            app.theme.secondary_style()
        } else {
            app.theme.style()
        };

        frame.render_widget(
            Paragraph::new(format!(" {mark} {service}")).style(style),
            Rect::new(area.x, y, area.width, 1),
        );
    }
}

fn draw_customer_form(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = &app.wizard;
    let insert_mode = app.vim_mode == VimMode::Insert;

    let header = format!(
        "Booking details for: {}",
        wizard.selected_service().unwrap_or("(no service)")
    );
    frame.render_widget(
        Paragraph::new(header).style(app.theme.secondary_style()),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let label_width = 20u16;
    for idx in 0..FIELD_COUNT {
        let y = area.y + 2 + idx as u16;
        if y >= area.y + area.height {
            break;
        }

        let focused = wizard.focused_field == idx;
        let label_style = if wizard.invalid_field == Some(idx) {
            app.theme.error_style()
        } else if focused {
            app.theme.primary_style()
        } else {
            app.theme.muted_style()
        };

        frame.render_widget(
            Paragraph::new(CustomerForm::label(idx)).style(label_style),
            Rect::new(area.x, y, label_width, 1),
        );

        let field = wizard.form.field(idx);
        let line = render_input_field(
            field.content(),
            field.cursor(),
            focused,
            insert_mode,
            &app.theme,
        );
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(
                area.x + label_width,
                y,
                area.width.saturating_sub(label_width),
                1,
            ),
        );
    }
}

fn draw_confirmation(frame: &mut Frame, area: Rect, app: &App) {
    let Some(summary) = app.wizard.summary.as_ref() else {
        return;
    };

    frame.render_widget(
        Paragraph::new("Please confirm the booking")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let rows = [
        ("Service", summary.service.clone()),
        ("Customer", summary.full_name()),
        ("Phone", summary.phone.clone()),
        ("Email", summary.email.clone()),
        ("License plate", summary.license_plate.clone()),
        (
            "Date & time",
            format!("{} {}", summary.booking_date, summary.booking_time),
        ),
    ];

    for (idx, (label, value)) in rows.iter().enumerate() {
        let y = area.y + 2 + idx as u16;
        if y >= area.y + area.height.saturating_sub(2) {
            break;
        }
        let line = Line::from(vec![
            Span::styled(format!("  {label:<15}"), app.theme.muted_style()),
            Span::styled(value.clone(), app.theme.style()),
        ]);
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(area.x, y, area.width, 1),
        );
    }

    if area.height > 10 {
        let button_y = area.y + area.height - 2;
        frame.render_widget(
            Paragraph::new(" [Enter] Confirm Booking ").style(app.theme.selection_style()),
            Rect::new(area.x, button_y, 26.min(area.width), 1),
        );
    }
}
