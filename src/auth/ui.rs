use super::LoginField;
use crate::app::App;
use crate::ui::widgets::render_input_field;
use crate::ui::Layout;
use crate::vim::VimMode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw_login_modal(frame: &mut Frame, area: Rect, app: &App) {
    let form_width = 46u16.min(area.width.saturating_sub(4));
    let form_height = 10u16;
    let form_area = Layout::centered_box(area, form_width, form_height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.primary_style())
        .title(" Staff Login ")
        .title_style(app.theme.primary_style().add_modifier(Modifier::BOLD));

    frame.render_widget(Clear, form_area);
    frame.render_widget(block, form_area);

    let inner = form_area.inner(Margin::new(2, 1));
    let insert_mode = app.vim_mode == VimMode::Insert;

    let chunks = ratatui::layout::Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Username label
            Constraint::Length(1), // Username input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password label
            Constraint::Length(1), // Password input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let username_focused = app.login.focus == LoginField::Username;
    frame.render_widget(
        Paragraph::new("Username").style(if username_focused {
            app.theme.primary_style()
        } else {
            app.theme.muted_style()
        }),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(render_input_field(
            app.login.username.content(),
            app.login.username.cursor(),
            username_focused,
            insert_mode,
            &app.theme,
        )),
        chunks[1],
    );

    let password_focused = app.login.focus == LoginField::Password;
    frame.render_widget(
        Paragraph::new("Password").style(if password_focused {
            app.theme.primary_style()
        } else {
            app.theme.muted_style()
        }),
        chunks[3],
    );
    let password_display = app.login.password.display('*');
    frame.render_widget(
        Paragraph::new(render_input_field(
            &password_display,
            app.login.password.cursor(),
            password_focused,
            insert_mode,
            &app.theme,
        )),
        chunks[4],
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter: sign in   Esc: close",
            app.theme.muted_style(),
        ))),
        chunks[6],
    );
}
