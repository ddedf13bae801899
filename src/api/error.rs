use reqwest::StatusCode;
use thiserror::Error;

/// Every way a call to the document service can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed.
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success status.
    #[error("{endpoint} responded with {status}")]
    Status {
        endpoint: String,
        status: StatusCode,
    },
    /// The service answered 2xx but not with the expected JSON.
    #[error("Unexpected response body from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
