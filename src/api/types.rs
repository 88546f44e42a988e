use serde::{Deserialize, Serialize};

/// Booking submission, serialized with the field names the garage API expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub license_plate: String,
    pub booking_date: String,
    pub booking_time: String,
    pub selected_service: String,
}

/// A stored booking as the API reports it. Owned by the service side; this
/// client only reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRecord {
    #[serde(default)]
    pub id: i64,
    pub fullname: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    pub service_type: String,
    pub booking_date: String,
    #[serde(default)]
    pub booking_time: String,
    pub license_plate: String,
    pub status: String,
}

/// 2xx body of POST /book.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfirmation {
    pub message: String,
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[serde(default)]
    pub tracking_key: Option<String>,
}

/// 2xx body of POST /login.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffSession {
    pub fullname: String,
    pub redirect: String,
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct StatusUpdateRequest<'a> {
    pub status: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct TrackEnvelope {
    pub data: BookingRecord,
}

#[derive(Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
