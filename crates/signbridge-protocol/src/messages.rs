//! Message shapes: matching the JSON the extension contexts exchange.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque tab identifier managed by the host browser.
pub type TabId = u32;

pub const NO_VIDEO_ELEMENT_MESSAGE: &str = "No video found or unsupported format.";
pub const NO_VIDEO_SOURCE_MESSAGE: &str = "Video element found, but no valid source detected.";
pub const RELAY_ACK_DATA: &str = "Video data processed";

/// Message actions understood by the extension contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "fetchVideoData")]
    FetchVideoData,
}

/// Panel -> page: `{ "action": "fetchVideoData" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDataRequest {
    pub action: Action,
}

impl VideoDataRequest {
    pub fn new() -> Self {
        Self {
            action: Action::FetchVideoData,
        }
    }

    /// Parse an incoming message. Foreign or malformed messages yield `None`.
    pub fn parse(message: &Value) -> Option<Self> {
        serde_json::from_value(message.clone()).ok()
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "action": "fetchVideoData" })
    }
}

impl Default for VideoDataRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Page -> panel answer to a [`VideoDataRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDataResponse {
    pub success: bool,
    #[serde(
        default,
        rename = "videoURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VideoDataResponse {
    /// A successful lookup carrying the resolved source.
    pub fn found(video_url: impl Into<String>) -> Self {
        Self {
            success: true,
            video_url: Some(video_url.into()),
            message: None,
        }
    }

    /// A failed lookup with an explanatory message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            success: false,
            video_url: None,
            message: Some(message.into()),
        }
    }

    /// The usable video URL: only when `success` is set and the URL is non-empty.
    pub fn usable_url(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.video_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Any origin -> background: `{ "action": "fetchVideoData", "videoUrl": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub action: Action,
    #[serde(default, rename = "videoUrl", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl RelayRequest {
    pub fn parse(message: &Value) -> Option<Self> {
        serde_json::from_value(message.clone()).ok()
    }
}

/// Background acknowledgement for a [`RelayRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    pub data: String,
}

impl RelayResponse {
    pub fn processed() -> Self {
        Self {
            success: true,
            data: RELAY_ACK_DATA.into(),
        }
    }
}

/// Panel -> backend HTTP body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub video_url: String,
}

/// Backend -> panel HTTP body. A missing `translation` means the backend failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Backend liveness answer from `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}
