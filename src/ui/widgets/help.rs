use crate::app::App;
use crate::ui::Layout;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let width = 58.min(area.width.saturating_sub(4));
    let height = 20.min(area.height.saturating_sub(2));
    let popup = Layout::centered_box(area, width, height);

    let help_text = [
        "",
        "Navigation:",
        "",
        "  j/k            Move / cycle fields",
        "  Space          Choose the highlighted service",
        "  Enter          Next step / search / confirm",
        "  Esc            Back one step / close popup",
        "",
        "Vim Modes:",
        "",
        "  i              Enter insert mode",
        "  Esc            Return to normal",
        "  :              Command mode",
        "",
        "Commands: :book :track :lookup :login :refresh :q",
        "",
        "Press q or Esc to close",
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Help ");

    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    for (i, line) in help_text.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(*line).style(app.theme.style()),
            Rect::new(inner.x, inner.y + i as u16, inner.width, 1),
        );
    }
}
