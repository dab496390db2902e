//! Tab messenger: install lifecycle, injection, relay.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{info, warn};

use signbridge_core::Result;
use signbridge_protocol::{MessageReply, RelayRequest, RelayResponse, TabId};

/// Host capability: load the page inspector into a tab's page context.
///
/// Implementations must tolerate repeated calls for the same tab.
#[async_trait]
pub trait ScriptInjector: Send + Sync {
    /// Returns `true` when a live inspector in the page was replaced.
    async fn inject_inspector(&self, tab: TabId) -> Result<bool>;
}

/// Result of an icon-click injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionOutcome {
    Injected,
    /// The tab already had an inspector; it was overwritten.
    Reinjected,
}

/// Background-context handler set.
pub struct TabMessenger {
    injector: Arc<dyn ScriptInjector>,
    /// Set once by the install hook.
    installed_at: OnceCell<String>,
}

impl TabMessenger {
    pub fn new(injector: Arc<dyn ScriptInjector>) -> Self {
        Self {
            injector,
            installed_at: OnceCell::new(),
        }
    }

    // ---------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------

    /// One-time install hook. Returns `true` only on the first call.
    pub fn on_installed(&self) -> bool {
        let mut first = false;
        self.installed_at.get_or_init(|| {
            first = true;
            chrono::Utc::now().to_rfc3339()
        });
        if first {
            info!("AI Sign Language Translator installed");
        }
        first
    }

    /// When the install hook ran, if it has.
    pub fn installed_at(&self) -> Option<&str> {
        self.installed_at.get().map(String::as_str)
    }

    // ---------------------------------------------------------------
    // Injection
    // ---------------------------------------------------------------

    /// Icon-click hook: inject the page inspector into `tab`.
    ///
    /// The outcome reflects the page's state, so a tab that navigated since
    /// the last click reports `Injected` again.
    pub async fn on_action_clicked(&self, tab: TabId) -> Result<InjectionOutcome> {
        if self.injector.inject_inspector(tab).await? {
            info!("Re-injected page inspector into tab {}", tab);
            Ok(InjectionOutcome::Reinjected)
        } else {
            info!("Injected page inspector into tab {}", tab);
            Ok(InjectionOutcome::Injected)
        }
    }

    // ---------------------------------------------------------------
    // Relay
    // ---------------------------------------------------------------

    /// Generic message relay. Acknowledges `fetchVideoData` immediately.
    pub fn handle_message(&self, message: &Value) -> MessageReply<RelayResponse> {
        match RelayRequest::parse(message) {
            Some(request) => {
                match request.video_url.as_deref() {
                    Some(url) => info!("Fetching video data for: {}", url),
                    None => warn!("fetchVideoData relay without videoUrl"),
                }
                MessageReply::Ready(RelayResponse::processed())
            }
            None => MessageReply::NoReply,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use signbridge_core::Error;
    use std::collections::HashSet;

    #[derive(Default)]
    struct RecordingInjector {
        calls: Mutex<Vec<TabId>>,
        live: Mutex<HashSet<TabId>>,
        closed: Vec<TabId>,
    }

    impl RecordingInjector {
        /// Page reload: the tab's inspector is gone.
        fn reload(&self, tab: TabId) {
            self.live.lock().remove(&tab);
        }
    }

    #[async_trait]
    impl ScriptInjector for RecordingInjector {
        async fn inject_inspector(&self, tab: TabId) -> Result<bool> {
            if self.closed.contains(&tab) {
                return Err(Error::Injection(format!("No tab with id: {}", tab)));
            }
            self.calls.lock().push(tab);
            Ok(!self.live.lock().insert(tab))
        }
    }

    #[test]
    fn test_install_hook_is_idempotent() {
        let messenger = TabMessenger::new(Arc::new(RecordingInjector::default()));
        assert!(messenger.installed_at().is_none());
        assert!(messenger.on_installed());
        let first_at = messenger.installed_at().map(str::to_string);
        assert!(!messenger.on_installed());
        assert_eq!(messenger.installed_at().map(str::to_string), first_at);
    }

    #[tokio::test]
    async fn test_reinjection_is_harmless() {
        let injector = Arc::new(RecordingInjector::default());
        let messenger = TabMessenger::new(injector.clone());

        assert_eq!(
            messenger.on_action_clicked(4).await.unwrap(),
            InjectionOutcome::Injected
        );
        assert_eq!(
            messenger.on_action_clicked(4).await.unwrap(),
            InjectionOutcome::Reinjected
        );
        assert_eq!(*injector.calls.lock(), vec![4, 4]);
    }

    #[tokio::test]
    async fn test_reload_resets_injection_outcome() {
        let injector = Arc::new(RecordingInjector::default());
        let messenger = TabMessenger::new(injector.clone());

        messenger.on_action_clicked(4).await.unwrap();
        injector.reload(4);
        assert_eq!(
            messenger.on_action_clicked(4).await.unwrap(),
            InjectionOutcome::Injected
        );
    }

    #[tokio::test]
    async fn test_injection_failure_propagates() {
        let injector = Arc::new(RecordingInjector {
            closed: vec![9],
            ..Default::default()
        });
        let messenger = TabMessenger::new(injector);
        let err = messenger.on_action_clicked(9).await.unwrap_err();
        assert!(matches!(err, Error::Injection(_)));
    }

    #[tokio::test]
    async fn test_relay_acknowledges_immediately() {
        let messenger = TabMessenger::new(Arc::new(RecordingInjector::default()));
        let reply = messenger.handle_message(&json!({
            "action": "fetchVideoData",
            "videoUrl": "https://x/a.mp4",
        }));
        match reply {
            MessageReply::Ready(ack) => assert_eq!(ack, RelayResponse::processed()),
            other => panic!("expected immediate ack, got {:?}", other),
        }

        let without_url = messenger
            .handle_message(&json!({ "action": "fetchVideoData" }))
            .resolve_json()
            .await
            .unwrap();
        assert_eq!(
            without_url,
            json!({ "success": true, "data": "Video data processed" })
        );
    }

    #[test]
    fn test_relay_ignores_other_actions() {
        let messenger = TabMessenger::new(Arc::new(RecordingInjector::default()));
        assert!(messenger
            .handle_message(&json!({ "action": "translate" }))
            .is_no_reply());
    }
}
