mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{BookingConfirmation, BookingRecord, BookingRequest, StaffSession};
