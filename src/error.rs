//! Errors returned by activity sources

use thiserror::Error;

/// Something went wrong while talking to an [`ActivitySource`](crate::traits::ActivitySource)
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request could not complete (connection refused, reset, invalid response...)
    #[error("transport failure: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The server answered a read request with an unexpected HTTP status
    #[error("unexpected HTTP status code {0}")]
    Status(u16),

    /// The server refused a signup or an unregistration
    #[error("request rejected with status {status}: {}", .detail.as_deref().unwrap_or("<no detail>"))]
    Rejected { status: u16, detail: Option<String> },

    /// The server answered with a body that cannot be decoded
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    /// Build a transport error out of any message
    pub fn transport<S: ToString>(message: S) -> Self {
        SourceError::Transport(message.to_string().into())
    }

    /// The detail the server gave when it rejected a request, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            SourceError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, SourceError::Rejected { .. })
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            log::debug!("Unable to decode a response body: {}", err);
        }
        SourceError::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_detail() {
        let err = SourceError::Rejected { status: 400, detail: Some("Already full".to_string()) };
        assert!(err.is_rejection());
        assert_eq!(err.detail(), Some("Already full"));
        assert_eq!(err.to_string(), "request rejected with status 400: Already full");

        let err = SourceError::transport("connection refused");
        assert!(err.is_rejection() == false);
        assert_eq!(err.detail(), None);
    }
}
