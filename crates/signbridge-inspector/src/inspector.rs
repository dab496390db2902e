//! Page inspector message handler.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use signbridge_protocol::{
    MessageReply, VideoDataRequest, VideoDataResponse, NO_VIDEO_ELEMENT_MESSAGE,
    NO_VIDEO_SOURCE_MESSAGE,
};

use crate::page::{PageDocument, VideoLookup};

/// Answers `fetchVideoData` requests for one page.
#[derive(Clone)]
pub struct PageInspector {
    page: Arc<dyn PageDocument>,
}

impl PageInspector {
    pub fn new(page: Arc<dyn PageDocument>) -> Self {
        info!("Page inspector loaded");
        Self { page }
    }

    /// Run the ordered lookup and build the response.
    pub fn inspect(&self) -> VideoDataResponse {
        match VideoLookup::run(self.page.as_ref()) {
            VideoLookup::NoVideoElement => {
                warn!("No video element found");
                VideoDataResponse::not_found(NO_VIDEO_ELEMENT_MESSAGE)
            }
            VideoLookup::NoSource => {
                warn!("Video element found, but no valid source detected");
                VideoDataResponse::not_found(NO_VIDEO_SOURCE_MESSAGE)
            }
            VideoLookup::Found(url) => {
                info!("Video source detected: {}", url);
                VideoDataResponse::found(url)
            }
        }
    }

    /// Handle a message from the panel.
    ///
    /// Returns `Pending` for `fetchVideoData`: the lookup runs on a spawned
    /// task and settles the reply after this call has returned. Anything
    /// else gets `NoReply`.
    pub fn handle_message(&self, message: &Value) -> MessageReply<VideoDataResponse> {
        debug!("Message received in page inspector: {}", message);

        if VideoDataRequest::parse(message).is_none() {
            return MessageReply::NoReply;
        }

        let (responder, reply) = MessageReply::pending();
        let inspector = self.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let response = inspector.inspect();
                    if !responder.send(response) {
                        debug!("Panel stopped waiting for video data");
                    }
                });
                reply
            }
            Err(_) => {
                debug!("No async runtime; answering inline");
                MessageReply::Ready(inspector.inspect())
            }
        }
    }
}
