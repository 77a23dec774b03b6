use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to {path} failed: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    #[error("unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("not signed in")]
    NotSignedIn,

    #[error("session storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Invalid(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 responses and for mutations attempted without a token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::NotSignedIn) || matches!(self.status(), Some(401 | 403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// What a view shows for this error. Auth and lookup failures get a
    /// plain sentence; everything else keeps its detail.
    pub fn user_message(&self) -> String {
        if self.is_unauthorized() {
            "your session is missing or has expired, sign in again".into()
        } else if self.is_not_found() {
            "not found".into()
        } else {
            self.to_string()
        }
    }
}
