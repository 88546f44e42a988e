use thiserror::Error;

#[derive(Error, Debug)]
pub enum PitstopError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("API client error: {0}")]
    Api(#[from] crate::api::ApiError),
}

pub type Result<T> = std::result::Result<T, PitstopError>;
