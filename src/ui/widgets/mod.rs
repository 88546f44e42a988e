mod help;
mod input_field;
mod message_panel;
mod status_bar;

pub use help::draw_help;
pub use input_field::render_input_field;
pub use message_panel::draw_message_panel;
pub use status_bar::{draw_status_bar, StatusBarState};

use crate::app::App;
use crate::ui::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

pub fn draw_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(Block::default().style(theme.style()), area);
}

/// One-line header: title and version on the left, who we're talking to (or
/// who is signed in) on the right.
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Clear, area);

    let title = format!(" {} (v{}) ", app.config.ui.title, env!("CARGO_PKG_VERSION"));
    frame.render_widget(
        Paragraph::new(title).style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        area,
    );

    let (right, style) = match &app.login.session {
        Some(session) => (
            format!("[Staff: {}] ", session.fullname),
            app.theme.secondary_style(),
        ),
        None => (
            format!("[{}] ", app.config.api.base_url),
            app.theme.muted_style(),
        ),
    };
    frame.render_widget(
        Paragraph::new(right).style(style).alignment(Alignment::Right),
        area,
    );
}
