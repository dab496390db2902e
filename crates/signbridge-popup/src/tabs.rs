//! Host tab access as seen from the panel.

use async_trait::async_trait;
use serde_json::Value;

use signbridge_protocol::TabId;

/// Host capability: find the active tab and message its page context.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Active tab of the current window, if any.
    async fn active_tab(&self) -> Option<TabId>;

    /// Send a message to the tab's page context and wait for its answer.
    /// `None` when nothing in the tab answered.
    async fn send_message(&self, tab: TabId, message: Value) -> Option<Value>;
}
