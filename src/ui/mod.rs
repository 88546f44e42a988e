mod layout;
mod theme;
pub mod widgets;

pub use layout::Layout;
pub use theme::Theme;
pub use widgets::StatusBarState;

use crate::app::{App, Screen};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let layout = Layout::new(frame.area());

    widgets::draw_background(frame, layout.full, &app.theme);
    widgets::draw_header(frame, layout.header, app);

    match app.screen {
        Screen::Booking => crate::booking::ui::draw(frame, layout.content, app),
        Screen::Tracker => crate::tracker::ui::draw(frame, layout.content, app),
        Screen::Dashboard => crate::admin::ui::draw(frame, layout.content, app),
    }

    // Always drawn; shows content only when there's something to say
    widgets::draw_message_panel(frame, layout.message, app);
    widgets::draw_status_bar(frame, layout.status, app);

    // Popups render on top of everything
    if app.show_login {
        crate::auth::ui::draw_login_modal(frame, layout.content, app);
    }

    if app.show_help {
        widgets::draw_help(frame, layout.content, app);
    }
}
