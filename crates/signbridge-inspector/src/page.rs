//! Page model: the slice of the DOM the inspector needs.

use serde::{Deserialize, Serialize};

/// Capability supplied by the host: access to the page's video elements.
pub trait PageDocument: Send + Sync {
    /// First video element in document order.
    fn first_video(&self) -> Option<&VideoElement>;
}

/// A nested `<source>` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceElement {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
}

/// A `<video>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoElement {
    /// The `src` attribute.
    #[serde(default)]
    pub src: Option<String>,
    /// The source the media element is currently playing.
    #[serde(default, rename = "currentSrc")]
    pub current_src: Option<String>,
    /// Nested `<source>` children in document order.
    #[serde(default)]
    pub sources: Vec<SourceElement>,
}

impl VideoElement {
    pub fn with_src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }

    /// Playable source: `src`, then `currentSrc`, then the first `<source>` child.
    pub fn resolve_source(&self) -> Option<&str> {
        non_empty(&self.src)
            .or_else(|| non_empty(&self.current_src))
            .or_else(|| self.sources.first().and_then(|s| non_empty(&s.src)))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A static page: URL plus video elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub videos: Vec<VideoElement>,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            videos: Vec::new(),
        }
    }

    pub fn with_video(mut self, video: VideoElement) -> Self {
        self.videos.push(video);
        self
    }

    /// Parse a snapshot from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl PageDocument for PageSnapshot {
    fn first_video(&self) -> Option<&VideoElement> {
        self.videos.first()
    }
}

/// Outcome of the ordered video lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoLookup {
    NoVideoElement,
    NoSource,
    Found(String),
}

impl VideoLookup {
    pub fn run(page: &dyn PageDocument) -> Self {
        match page.first_video() {
            None => Self::NoVideoElement,
            Some(video) => match video.resolve_source() {
                Some(src) => Self::Found(src.to_string()),
                None => Self::NoSource,
            },
        }
    }
}

/// Source URL of the page's first video, if one resolves.
pub fn find_video_source(page: &dyn PageDocument) -> Option<String> {
    match VideoLookup::run(page) {
        VideoLookup::Found(url) => Some(url),
        _ => None,
    }
}
