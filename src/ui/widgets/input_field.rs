use crate::ui::Theme;
use ratatui::prelude::*;

/// Render a single-line input with a cursor: a bar cursor in insert mode, a
/// block cursor in normal mode. Unfocused fields are dimmed.
pub fn render_input_field(
    content: &str,
    cursor: usize,
    focused: bool,
    insert_mode: bool,
    theme: &Theme,
) -> Line<'static> {
    let prefix = if focused { "> " } else { "  " };

    if !focused {
        return Line::from(vec![
            Span::styled(prefix, theme.muted_style()),
            Span::styled(content.to_string(), theme.muted_style()),
        ]);
    }

    let mut spans = vec![Span::styled(prefix, theme.primary_style())];
    let chars: Vec<char> = content.chars().collect();

    if insert_mode {
        let cursor = cursor.min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let after: String = chars[cursor..].iter().collect();

        spans.push(Span::raw(before));
        spans.push(Span::styled("│", theme.primary_style()));
        spans.push(Span::raw(after));
    } else if chars.is_empty() {
        spans.push(Span::styled(
            " ".to_string(),
            Style::default().bg(theme.primary).fg(theme.background),
        ));
    } else {
        let cursor = cursor.min(chars.len() - 1);
        let before: String = chars[..cursor].iter().collect();
        let cursor_char = chars[cursor].to_string();
        let after: String = chars[cursor + 1..].iter().collect();

        spans.push(Span::raw(before));
        spans.push(Span::styled(
            cursor_char,
            Style::default().bg(theme.primary).fg(theme.background),
        ));
        spans.push(Span::raw(after));
    }

    Line::from(spans)
}
