use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn draw_message_panel(frame: &mut Frame, area: Rect, app: &App) {
    let (text, is_error) = match &app.message {
        Some(m) => (m.text.clone(), m.is_error),
        None if app.in_flight => ("Please wait...".to_string(), false),
        None => return,
    };

    let (title, border_style, text_style) = if is_error {
        (" Error ", app.theme.error_style(), app.theme.error_style())
    } else {
        (" Info ", app.theme.secondary_style(), app.theme.style())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(border_style.add_modifier(Modifier::BOLD));

    let mut spans = vec![Span::styled(text, text_style)];
    if !app.in_flight {
        spans.push(Span::styled(
            " (press any key to dismiss)",
            app.theme.muted_style(),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
