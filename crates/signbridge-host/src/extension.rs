//! The installed extension: background, page and panel contexts sharing one
//! simulated browser.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use signbridge_background::{InjectionOutcome, TabMessenger};
use signbridge_core::{Error, Result};
use signbridge_popup::{StatusDisplay, TranslationBackend, TranslationRequester, Trigger};
use signbridge_protocol::{TabId, VideoDataRequest};

use crate::browser::SimulatedBrowser;

pub struct Extension {
    pub browser: Arc<SimulatedBrowser>,
    pub messenger: TabMessenger,
    pub requester: TranslationRequester,
}

impl Extension {
    /// Install the extension into `browser`. Runs the install hook.
    pub fn install(
        browser: Arc<SimulatedBrowser>,
        backend: Arc<dyn TranslationBackend>,
        display: Arc<dyn StatusDisplay>,
    ) -> Self {
        let messenger = TabMessenger::new(browser.clone());
        messenger.on_installed();
        let requester = TranslationRequester::new(browser.clone(), backend, display);
        Self {
            browser,
            messenger,
            requester,
        }
    }

    /// Toolbar icon click on the active tab.
    pub async fn click_icon(&self) -> Result<(TabId, InjectionOutcome)> {
        let tab = self.browser.current_tab().ok_or(Error::NoActiveTab)?;
        let outcome = self.messenger.on_action_clicked(tab).await?;
        Ok((tab, outcome))
    }

    /// The panel's start button.
    pub async fn start_translation(&self) -> Trigger {
        self.requester.start_translation().await
    }

    /// Ask the active tab's inspector directly, as the panel does.
    pub async fn inspect_active(&self) -> Result<Option<Value>> {
        use signbridge_popup::TabHost;

        let tab = self.browser.current_tab().ok_or(Error::NoActiveTab)?;
        Ok(self
            .browser
            .send_message(tab, VideoDataRequest::new().to_value())
            .await)
    }

    /// Deliver a runtime message to the background context.
    pub async fn send_runtime_message(&self, message: &Value) -> Option<Value> {
        let reply = self.messenger.handle_message(message).resolve_json().await;
        if reply.is_none() {
            info!("Runtime message had no listener: {}", message);
        }
        reply
    }
}
