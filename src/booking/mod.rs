pub mod ui;

use crate::api::BookingRequest;
use crate::vim::InputBuffer;
use chrono::{NaiveDate, NaiveTime};

/// The three wizard panels, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    ServiceSelection,
    CustomerForm,
    Confirmation,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            WizardStep::ServiceSelection => 0,
            WizardStep::CustomerForm => 1,
            WizardStep::Confirmation => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::ServiceSelection => "Service",
            WizardStep::CustomerForm => "Details",
            WizardStep::Confirmation => "Confirm",
        }
    }

    pub const COUNT: usize = 3;
}

// Customer form field indices, in focus order.
pub const FIELD_FIRST_NAME: usize = 0;
pub const FIELD_LAST_NAME: usize = 1;
pub const FIELD_PHONE: usize = 2;
pub const FIELD_EMAIL: usize = 3;
pub const FIELD_LICENSE_PLATE: usize = 4;
pub const FIELD_BOOKING_DATE: usize = 5;
pub const FIELD_BOOKING_TIME: usize = 6;
pub const FIELD_COUNT: usize = 7;

/// A required form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: usize,
    pub message: String,
}

/// The customer details entered in step two.
#[derive(Default)]
pub struct CustomerForm {
    pub first_name: InputBuffer,
    pub last_name: InputBuffer,
    pub phone: InputBuffer,
    pub email: InputBuffer,
    pub license_plate: InputBuffer,
    pub booking_date: InputBuffer,
    pub booking_time: InputBuffer,
}

impl CustomerForm {
    pub fn field(&self, idx: usize) -> &InputBuffer {
        match idx {
            FIELD_FIRST_NAME => &self.first_name,
            FIELD_LAST_NAME => &self.last_name,
            FIELD_PHONE => &self.phone,
            FIELD_EMAIL => &self.email,
            FIELD_LICENSE_PLATE => &self.license_plate,
            FIELD_BOOKING_DATE => &self.booking_date,
            _ => &self.booking_time,
        }
    }

    pub fn field_mut(&mut self, idx: usize) -> &mut InputBuffer {
        match idx {
            FIELD_FIRST_NAME => &mut self.first_name,
            FIELD_LAST_NAME => &mut self.last_name,
            FIELD_PHONE => &mut self.phone,
            FIELD_EMAIL => &mut self.email,
            FIELD_LICENSE_PLATE => &mut self.license_plate,
            FIELD_BOOKING_DATE => &mut self.booking_date,
            _ => &mut self.booking_time,
        }
    }

    pub fn label(idx: usize) -> &'static str {
        match idx {
            FIELD_FIRST_NAME => "First name",
            FIELD_LAST_NAME => "Last name",
            FIELD_PHONE => "Phone",
            FIELD_EMAIL => "Email",
            FIELD_LICENSE_PLATE => "License plate",
            FIELD_BOOKING_DATE => "Date (YYYY-MM-DD)",
            _ => "Time (HH:MM)",
        }
    }

    /// Check every field, stopping at the first problem. The date and time
    /// formats are the ones the booking API parses.
    pub fn validate(&self) -> Result<(), FieldError> {
        for idx in 0..FIELD_COUNT {
            let value = self.field(idx).content().trim().to_string();
            if value.is_empty() {
                return Err(FieldError {
                    field: idx,
                    message: format!("{} is required", Self::label(idx)),
                });
            }

            let problem = match idx {
                FIELD_PHONE if !looks_like_phone(&value) => {
                    Some("Phone must be digits (optionally starting with +)")
                }
                FIELD_EMAIL if !looks_like_email(&value) => {
                    Some("Email address looks invalid")
                }
                FIELD_BOOKING_DATE
                    if NaiveDate::parse_from_str(&value, "%Y-%m-%d").is_err() =>
                {
                    Some("Date must be YYYY-MM-DD")
                }
                FIELD_BOOKING_TIME
                    if NaiveTime::parse_from_str(&value, "%H:%M").is_err() =>
                {
                    Some("Time must be HH:MM")
                }
                _ => None,
            };

            if let Some(message) = problem {
                return Err(FieldError {
                    field: idx,
                    message: message.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn looks_like_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    digits.len() >= 7 && digits.chars().all(|c| c.is_ascii_digit())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && domain.len() > 2,
        None => false,
    }
}

/// Snapshot of the form taken at the moment the wizard entered Confirmation.
/// The confirmation panel and the submitted request both come from here, so a
/// later edit cannot leak into an already-reviewed summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub license_plate: String,
    pub booking_date: String,
    pub booking_time: String,
    pub service: String,
}

impl BookingSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn to_request(&self) -> BookingRequest {
        BookingRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            license_plate: self.license_plate.clone(),
            booking_date: self.booking_date.clone(),
            booking_time: self.booking_time.clone(),
            selected_service: self.service.clone(),
        }
    }
}

/// The booking wizard model. All panel drawing is a projection of this; the
/// rendered UI is never read back.
pub struct BookingWizard {
    pub step: WizardStep,
    pub services: Vec<String>,
    /// Row the cursor is on in the service list.
    pub cursor: usize,
    /// The chosen service. `Option<usize>` keeps "at most one selected" true
    /// by construction.
    pub selected: Option<usize>,
    pub form: CustomerForm,
    pub focused_field: usize,
    /// Field highlighted after a failed validation, cleared on the next edit.
    pub invalid_field: Option<usize>,
    pub summary: Option<BookingSummary>,
}

impl BookingWizard {
    pub fn new(services: Vec<String>) -> Self {
        Self {
            step: WizardStep::ServiceSelection,
            services,
            cursor: 0,
            selected: None,
            form: CustomerForm::default(),
            focused_field: 0,
            invalid_field: None,
            summary: None,
        }
    }

    pub fn selected_service(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.services.get(idx))
            .map(String::as_str)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.services.len() {
            self.cursor += 1;
        }
    }

    /// Mark the service under the cursor as the chosen one, replacing any
    /// previous choice.
    pub fn select_highlighted(&mut self) {
        if self.cursor < self.services.len() {
            self.selected = Some(self.cursor);
        }
    }

    pub fn focus_next_field(&mut self) {
        self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
    }

    pub fn focus_prev_field(&mut self) {
        self.focused_field = (self.focused_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    /// Try to move to the next step. On a guard failure the step is unchanged
    /// and the user-facing warning comes back as Err.
    pub fn advance(&mut self) -> Result<(), String> {
        match self.step {
            WizardStep::ServiceSelection => {
                if self.selected_service().is_none() {
                    return Err("Select a service first".to_string());
                }
                self.step = WizardStep::CustomerForm;
                Ok(())
            }
            WizardStep::CustomerForm => {
                if let Err(e) = self.form.validate() {
                    self.invalid_field = Some(e.field);
                    self.focused_field = e.field;
                    return Err(e.message);
                }
                self.invalid_field = None;
                self.summary = Some(self.snapshot());
                self.step = WizardStep::Confirmation;
                Ok(())
            }
            WizardStep::Confirmation => Ok(()),
        }
    }

    /// Go back one panel. The summary is dropped so it can never go stale.
    pub fn retreat(&mut self) {
        match self.step {
            WizardStep::ServiceSelection => {}
            WizardStep::CustomerForm => {
                self.step = WizardStep::ServiceSelection;
            }
            WizardStep::Confirmation => {
                self.summary = None;
                self.step = WizardStep::CustomerForm;
            }
        }
    }

    /// The request to submit, available only on the confirmation panel.
    pub fn request(&self) -> Option<BookingRequest> {
        self.summary.as_ref().map(BookingSummary::to_request)
    }

    pub fn note_edit(&mut self) {
        self.invalid_field = None;
    }

    fn snapshot(&self) -> BookingSummary {
        let value = |idx: usize| self.form.field(idx).content().trim().to_string();
        BookingSummary {
            first_name: value(FIELD_FIRST_NAME),
            last_name: value(FIELD_LAST_NAME),
            phone: value(FIELD_PHONE),
            email: value(FIELD_EMAIL),
            license_plate: value(FIELD_LICENSE_PLATE),
            booking_date: value(FIELD_BOOKING_DATE),
            booking_time: value(FIELD_BOOKING_TIME),
            service: self.selected_service().unwrap_or_default().to_string(),
        }
    }
}
