mod timeline;
pub mod ui;

pub use timeline::{Timeline, TimelineStage};

use crate::api::{ApiError, BookingRecord};
use crate::vim::InputBuffer;
use tracing::{debug, warn};

/// Where the tracker panel currently is. Every lookup is a fresh fetch;
/// nothing is cached between states.
pub enum LookupState {
    Idle,
    /// Submitted with an empty key; inline error, no request was issued.
    MissingKey,
    Searching,
    Found {
        record: BookingRecord,
        timeline: Timeline,
    },
    /// Not found, or the request failed outright. One message either way.
    NotFound {
        key: String,
    },
}

pub struct StatusTracker {
    pub key: InputBuffer,
    pub state: LookupState,
    stages: Vec<String>,
}

impl StatusTracker {
    pub fn new(stages: Vec<String>) -> Self {
        Self {
            key: InputBuffer::new(),
            state: LookupState::Idle,
            stages,
        }
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    /// Fill the lookup field, e.g. with the phone number of a booking that
    /// was just confirmed.
    pub fn prefill(&mut self, key: &str) {
        self.key.set(key);
    }

    /// Validate the key and move to Searching. Returns the trimmed key to
    /// query, or None when the inline error was raised instead; in that case
    /// no request may be issued.
    pub fn begin_lookup(&mut self) -> Option<String> {
        let key = self.key.content().trim().to_string();
        if key.is_empty() {
            self.state = LookupState::MissingKey;
            return None;
        }
        self.state = LookupState::Searching;
        Some(key)
    }

    /// Fold the API result into the panel state.
    pub fn finish_lookup(&mut self, key: &str, result: Result<BookingRecord, ApiError>) {
        match result {
            Ok(record) => {
                let timeline = Timeline::compute(&self.stages, &record.status);
                if !timeline.has_match() {
                    warn!(
                        status = %record.status,
                        "booking status matches no configured stage"
                    );
                }
                self.state = LookupState::Found { record, timeline };
            }
            Err(e) => {
                // Not-found and transport failures render the same message;
                // the log keeps the real cause.
                match &e {
                    ApiError::NotFound(_) => debug!("no booking for key {key}"),
                    other => warn!("tracking lookup failed: {other}"),
                }
                self.state = LookupState::NotFound {
                    key: key.to_string(),
                };
            }
        }
    }
}
