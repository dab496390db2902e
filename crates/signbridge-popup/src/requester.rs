//! Translation requester: one run per user trigger.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use signbridge_core::{Error, Result};
use signbridge_protocol::{TranslationRequest, VideoDataRequest, VideoDataResponse};

use crate::backend::TranslationBackend;
use crate::status::{StatusDisplay, StatusUpdate, TranslationStatus};
use crate::tabs::TabHost;

/// Outcome of a user trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The run finished in this terminal status.
    Completed(TranslationStatus),
    /// A previous run was still in flight; this trigger was dropped.
    Ignored,
}

/// Clears the in-flight flag when a run ends, including on early return.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The panel's "startTranslation" action.
pub struct TranslationRequester {
    tabs: Arc<dyn TabHost>,
    backend: Arc<dyn TranslationBackend>,
    display: Arc<dyn StatusDisplay>,
    in_flight: AtomicBool,
    last_update: RwLock<StatusUpdate>,
}

impl TranslationRequester {
    pub fn new(
        tabs: Arc<dyn TabHost>,
        backend: Arc<dyn TranslationBackend>,
        display: Arc<dyn StatusDisplay>,
    ) -> Self {
        Self {
            tabs,
            backend,
            display,
            in_flight: AtomicBool::new(false),
            last_update: RwLock::new(StatusUpdate::now(TranslationStatus::Idle)),
        }
    }

    /// Most recently rendered status.
    pub fn status(&self) -> StatusUpdate {
        self.last_update.read().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handle a user trigger. Overlapping triggers are ignored while a run is pending.
    pub async fn start_translation(&self) -> Trigger {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Translation already in progress; ignoring trigger");
            return Trigger::Ignored;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let span = info_span!("translation", run_id = %Uuid::new_v4());
        let status = async {
            match self.run().await {
                Ok(translation) => {
                    info!("Translation received ({} chars)", translation.len());
                    TranslationStatus::TranslationReceived(translation)
                }
                Err(e) => {
                    match &e {
                        Error::NoActiveTab | Error::NoVideoFound => warn!("{}", e),
                        _ => error!("Backend request failed: {}", e),
                    }
                    TranslationStatus::from_error(&e)
                }
            }
        }
        .instrument(span)
        .await;

        self.set_status(status.clone());
        Trigger::Completed(status)
    }

    async fn run(&self) -> Result<String> {
        self.set_status(TranslationStatus::CheckingVideo);

        let tab = self.tabs.active_tab().await.ok_or(Error::NoActiveTab)?;

        let reply = self
            .tabs
            .send_message(tab, VideoDataRequest::new().to_value())
            .await;
        let response: Option<VideoDataResponse> =
            reply.and_then(|value| serde_json::from_value(value).ok());
        let video_url = response
            .as_ref()
            .and_then(VideoDataResponse::usable_url)
            .map(str::to_string)
            .ok_or(Error::NoVideoFound)?;

        info!("Video detected in tab {}: {}", tab, video_url);
        self.set_status(TranslationStatus::BackendPending);

        let result = self
            .backend
            .translate(&TranslationRequest { video_url })
            .await?;
        debug!("Backend response: {:?}", result);

        // An empty translation counts as missing.
        result
            .translation
            .filter(|t| !t.is_empty())
            .ok_or(Error::TranslationMissing)
    }

    fn set_status(&self, status: TranslationStatus) {
        let update = StatusUpdate::now(status);
        self.display.render(&update);
        *self.last_update.write() = update;
    }
}
