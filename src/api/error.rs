use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP 409 on booking: the requested slot is already taken. The message
    /// is the server's text, surfaced verbatim.
    #[error("{0}")]
    Conflict(String),

    /// HTTP 404 on tracking: no booking behind the lookup key.
    #[error("no booking found: {0}")]
    NotFound(String),

    /// Any other non-2xx response, with the server's error text when it sent one.
    #[error("request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Server-supplied text for this failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Conflict(msg) | ApiError::NotFound(msg) => {
                (!msg.is_empty()).then_some(msg.as_str())
            }
            ApiError::Rejected { message, .. } => {
                (!message.is_empty()).then_some(message.as_str())
            }
            ApiError::Transport(_) => None,
        }
    }
}
