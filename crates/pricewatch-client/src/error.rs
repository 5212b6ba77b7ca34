use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request with a 4xx status. `message` carries
    /// the `{"error": …}` body when the backend supplied one; callers fall
    /// back to a generic message when it is `None`.
    #[error("backend rejected request: {}", message.as_deref().unwrap_or("no error message"))]
    Rejected { message: Option<String> },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// Returns the backend's rejection message, if this error carries one.
    #[must_use]
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }
}
