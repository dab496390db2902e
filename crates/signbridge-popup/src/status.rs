//! Panel status machine and display surface.

use parking_lot::Mutex;
use serde::Serialize;

use signbridge_core::Error;

/// Status shown in the panel's single display region.
///
/// `Idle -> CheckingVideo -> {NoActiveTab | VideoError | BackendPending}`,
/// `BackendPending -> {BackendError | TranslationReceived | TranslationError}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "translation", rename_all = "camelCase")]
pub enum TranslationStatus {
    Idle,
    CheckingVideo,
    NoActiveTab,
    VideoError,
    BackendPending,
    BackendError,
    TranslationReceived(String),
    TranslationError,
}

/// Display colour of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Neutral,
    Green,
    Red,
}

impl TranslationStatus {
    /// Text rendered in the status region.
    pub fn message(&self) -> String {
        match self {
            Self::Idle => "Ready".into(),
            Self::CheckingVideo => "Checking for video...".into(),
            Self::NoActiveTab => "No active tab found".into(),
            Self::VideoError => "No video found".into(),
            Self::BackendPending => "Video detected! Sending to backend...".into(),
            Self::BackendError => "Error connecting to backend!".into(),
            Self::TranslationReceived(text) => format!("Translation received!\n{}", text),
            Self::TranslationError => "Error in translation!".into(),
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Idle | Self::CheckingVideo => StatusTone::Neutral,
            Self::BackendPending | Self::TranslationReceived(_) => StatusTone::Green,
            Self::NoActiveTab
            | Self::VideoError
            | Self::BackendError
            | Self::TranslationError => StatusTone::Red,
        }
    }

    /// Terminal states stay until the user triggers again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Idle | Self::CheckingVideo | Self::BackendPending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::TranslationReceived(_))
    }

    /// Terminal status for a failed run.
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::NoActiveTab => Self::NoActiveTab,
            Error::NoVideoFound => Self::VideoError,
            Error::TranslationMissing => Self::TranslationError,
            _ => Self::BackendError,
        }
    }
}

impl std::fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// A rendered status, stamped when it was shown.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: TranslationStatus,
    pub message: String,
    pub tone: StatusTone,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl StatusUpdate {
    pub fn now(status: TranslationStatus) -> Self {
        Self {
            message: status.message(),
            tone: status.tone(),
            status,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// The panel's status region.
pub trait StatusDisplay: Send + Sync {
    fn render(&self, update: &StatusUpdate);
}

/// Display that keeps every update in memory.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    updates: Mutex<Vec<StatusUpdate>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().clone()
    }

    pub fn statuses(&self) -> Vec<TranslationStatus> {
        self.updates.lock().iter().map(|u| u.status.clone()).collect()
    }

    pub fn last(&self) -> Option<StatusUpdate> {
        self.updates.lock().last().cloned()
    }
}

impl StatusDisplay for MemoryDisplay {
    fn render(&self, update: &StatusUpdate) {
        self.updates.lock().push(update.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_tones() {
        assert_eq!(TranslationStatus::NoActiveTab.message(), "No active tab found");
        assert_eq!(TranslationStatus::VideoError.message(), "No video found");
        assert_eq!(
            TranslationStatus::BackendPending.message(),
            "Video detected! Sending to backend..."
        );
        assert_eq!(
            TranslationStatus::BackendError.message(),
            "Error connecting to backend!"
        );
        assert_eq!(
            TranslationStatus::TranslationError.message(),
            "Error in translation!"
        );

        let received = TranslationStatus::TranslationReceived("HELLO WORLD".into());
        assert!(received.message().starts_with("Translation received!"));
        assert!(received.message().contains("HELLO WORLD"));
        assert_eq!(received.tone(), StatusTone::Green);
        assert_eq!(TranslationStatus::VideoError.tone(), StatusTone::Red);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!TranslationStatus::Idle.is_terminal());
        assert!(!TranslationStatus::CheckingVideo.is_terminal());
        assert!(!TranslationStatus::BackendPending.is_terminal());
        assert!(TranslationStatus::NoActiveTab.is_terminal());
        assert!(TranslationStatus::BackendError.is_terminal());
        assert!(TranslationStatus::TranslationReceived(String::new()).is_terminal());
    }

    #[test]
    fn test_from_error() {
        assert_eq!(
            TranslationStatus::from_error(&Error::NoActiveTab),
            TranslationStatus::NoActiveTab
        );
        assert_eq!(
            TranslationStatus::from_error(&Error::NoVideoFound),
            TranslationStatus::VideoError
        );
        assert_eq!(
            TranslationStatus::from_error(&Error::TranslationMissing),
            TranslationStatus::TranslationError
        );
        assert_eq!(
            TranslationStatus::from_error(&Error::BackendStatus(500)),
            TranslationStatus::BackendError
        );
        assert_eq!(
            TranslationStatus::from_error(&Error::BackendUnreachable("refused".into())),
            TranslationStatus::BackendError
        );
    }

    #[test]
    fn test_update_serializes() {
        let update = StatusUpdate::now(TranslationStatus::TranslationReceived("HI".into()));
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"]["state"], "translationReceived");
        assert_eq!(json["status"]["translation"], "HI");
        assert_eq!(json["tone"], "green");
        assert!(json["updatedAt"].is_string());
    }
}
