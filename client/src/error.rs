use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response body
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Not authenticated")]
    NotAuthenticated,
}

pub type ClientResult<T> = Result<T, ClientError>;
