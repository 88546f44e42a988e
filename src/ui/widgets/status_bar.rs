use crate::app::{App, Screen};
use crate::booking::WizardStep;
use crate::vim::VimMode;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

/// Contextual key hints, updated by the app after every key.
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub left_hint: String,
    pub right_hint: String,
}

impl StatusBarState {
    pub fn service_selection() -> Self {
        Self {
            left_hint: "j/k: move  Space: choose".to_string(),
            right_hint: "Enter: next  :help".to_string(),
        }
    }

    pub fn customer_form(mode: VimMode) -> Self {
        if mode == VimMode::Insert {
            Self {
                left_hint: "Type to enter text".to_string(),
                right_hint: "Esc: normal  Tab: next field".to_string(),
            }
        } else {
            Self {
                left_hint: "j/k: fields  i: edit".to_string(),
                right_hint: "Enter: next  Esc: back".to_string(),
            }
        }
    }

    pub fn confirmation() -> Self {
        Self {
            left_hint: "Review the booking".to_string(),
            right_hint: "Enter: confirm  Esc: back".to_string(),
        }
    }

    pub fn tracker(mode: VimMode) -> Self {
        if mode == VimMode::Insert {
            Self {
                left_hint: "Phone number or email".to_string(),
                right_hint: "Enter: search  Esc: normal".to_string(),
            }
        } else {
            Self {
                left_hint: "i: edit key".to_string(),
                right_hint: "Enter: search  :book".to_string(),
            }
        }
    }

    pub fn dashboard(picker_open: bool) -> Self {
        if picker_open {
            Self {
                left_hint: "j/k: pick a stage".to_string(),
                right_hint: "Enter: apply  Esc: cancel".to_string(),
            }
        } else {
            Self {
                left_hint: "j/k: select booking".to_string(),
                right_hint: "Enter: set status  r: refresh".to_string(),
            }
        }
    }

    pub fn login(mode: VimMode) -> Self {
        if mode == VimMode::Insert {
            Self {
                left_hint: "Staff credentials".to_string(),
                right_hint: "Enter: sign in  Esc: normal".to_string(),
            }
        } else {
            Self {
                left_hint: "i: edit  j/k: fields".to_string(),
                right_hint: "Enter: sign in  Esc: close".to_string(),
            }
        }
    }

    pub fn busy() -> Self {
        Self {
            left_hint: "Please wait...".to_string(),
            right_hint: String::new(),
        }
    }
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Clear, area);

    let mode_name = app.vim_mode.display_name();
    let mode_span = Span::styled(format!(" {mode_name} "), app.theme.mode_style(mode_name));

    let after_mode = if app.vim_mode == VimMode::Command {
        Span::styled(
            format!(":{}", app.command_buffer.content()),
            app.theme.style(),
        )
    } else {
        Span::styled(app.status_bar.left_hint.clone(), app.theme.muted_style())
    };

    let left_line = Line::from(vec![mode_span, Span::raw(" "), after_mode]);
    frame.render_widget(
        Paragraph::new(left_line),
        Rect::new(area.x, area.y, area.width * 2 / 3, 1),
    );

    // Wizard progress on the right while booking
    let progress = match app.screen {
        Screen::Booking => format!(
            "Step {}/{}",
            app.wizard.step.index() + 1,
            WizardStep::COUNT
        ),
        Screen::Tracker => "Tracking".to_string(),
        Screen::Dashboard => "Dashboard".to_string(),
    };

    let right_text = if app.status_bar.right_hint.is_empty() {
        progress
    } else {
        format!("{progress}  {}", app.status_bar.right_hint)
    };

    frame.render_widget(
        Paragraph::new(right_text)
            .style(app.theme.muted_style())
            .alignment(Alignment::Right),
        Rect::new(area.x + area.width / 3, area.y, area.width * 2 / 3, 1),
    );
}
