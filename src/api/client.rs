use super::error::ApiError;
use super::types::{
    BookingConfirmation, BookingRecord, BookingRequest, ErrorBody, LoginRequest, MessageBody,
    StaffSession, StatusUpdateRequest, TrackEnvelope,
};
use crate::config::ApiConfig;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the garage booking API. One instance per app; every call
/// is a fresh request, nothing is cached or retried.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a booking. 409 means the slot is already taken.
    pub async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, ApiError> {
        let url = format!("{}/book", self.base_url);
        debug!("POST {url}");

        let resp = self.client.post(&url).json(request).send().await?;
        let status = resp.status();

        if status == StatusCode::CONFLICT {
            return Err(ApiError::Conflict(error_text(resp).await));
        }
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: error_text(resp).await,
            });
        }

        Ok(resp.json().await?)
    }

    /// Look up the latest booking behind a phone number or email.
    pub async fn track(&self, key: &str) -> Result<BookingRecord, ApiError> {
        let url = format!("{}/track", self.base_url);
        debug!("GET {url}?key={key}");

        let resp = self
            .client
            .get(&url)
            .query(&[("key", key)])
            .send()
            .await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(error_text(resp).await));
        }
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: error_text(resp).await,
            });
        }

        let envelope: TrackEnvelope = resp.json().await?;
        Ok(envelope.data)
    }

    /// Authenticate a staff member.
    pub async fn login(&self, username: &str, password: &str) -> Result<StaffSession, ApiError> {
        let url = format!("{}/login", self.base_url);
        debug!("POST {url} for {username}");

        let resp = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: error_text(resp).await,
            });
        }

        Ok(resp.json().await?)
    }

    /// Staff dashboard: all bookings, oldest first.
    pub async fn bookings(&self) -> Result<Vec<BookingRecord>, ApiError> {
        let url = format!("{}/admin/bookings", self.base_url);
        debug!("GET {url}");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: error_text(resp).await,
            });
        }

        Ok(resp.json().await?)
    }

    /// Staff dashboard: move a booking to a new lifecycle stage.
    pub async fn update_status(&self, booking_id: i64, new_status: &str) -> Result<String, ApiError> {
        let url = format!("{}/admin/update_status/{booking_id}", self.base_url);
        debug!("POST {url} -> {new_status}");

        let resp = self
            .client
            .post(&url)
            .json(&StatusUpdateRequest { status: new_status })
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: error_text(resp).await,
            });
        }

        let body: MessageBody = resp.json().await?;
        Ok(body.message)
    }
}

/// Pull the `{ "error": ... }` text out of a failure body, tolerating bodies
/// that are not JSON at all.
async fn error_text(resp: reqwest::Response) -> String {
    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(_) => return String::new(),
    };
    serde_json::from_slice::<ErrorBody>(&bytes)
        .map(|body| body.error)
        .unwrap_or_default()
}
