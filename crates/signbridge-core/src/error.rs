//! Error types for SignBridge.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No active tab found")]
    NoActiveTab,

    #[error("No video found")]
    NoVideoFound,

    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    #[error("Backend returned status {0}")]
    BackendStatus(u16),

    #[error("Backend response did not include a translation")]
    TranslationMissing,

    #[error("Injection error: {0}")]
    Injection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl Error {
    /// Whether the backend could not be reached or answered with a non-2xx status.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::BackendUnreachable(_) | Self::BackendStatus(_) | Self::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_failure_classification() {
        assert!(Error::BackendStatus(500).is_backend_failure());
        assert!(Error::BackendUnreachable("refused".into()).is_backend_failure());
        assert!(Error::Http("timeout".into()).is_backend_failure());
        assert!(!Error::TranslationMissing.is_backend_failure());
        assert!(!Error::NoVideoFound.is_backend_failure());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::NoActiveTab.to_string(), "No active tab found");
        assert_eq!(Error::BackendStatus(502).to_string(), "Backend returned status 502");
    }
}
