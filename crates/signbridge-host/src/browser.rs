//! Simulated browser: tabs holding page snapshots, script injection and
//! tab messaging.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use signbridge_background::ScriptInjector;
use signbridge_core::{Error, Result};
use signbridge_inspector::{PageInspector, PageSnapshot};
use signbridge_popup::TabHost;
use signbridge_protocol::TabId;

struct Tab {
    page: Arc<PageSnapshot>,
    /// Present once the inspector has been injected into the page.
    inspector: Option<PageInspector>,
}

/// Single-window browser.
pub struct SimulatedBrowser {
    tabs: RwLock<BTreeMap<TabId, Tab>>,
    active: RwLock<Option<TabId>>,
    next_id: AtomicU32,
}

impl SimulatedBrowser {
    pub fn new() -> Self {
        Self {
            tabs: RwLock::new(BTreeMap::new()),
            active: RwLock::new(None),
            next_id: AtomicU32::new(1),
        }
    }

    /// Open a tab on `page` and make it active.
    pub fn open_tab(&self, page: PageSnapshot) -> TabId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        info!("Opened tab {} at {}", id, page.url);
        self.tabs.write().insert(
            id,
            Tab {
                page: Arc::new(page),
                inspector: None,
            },
        );
        *self.active.write() = Some(id);
        id
    }

    /// Close a tab. The active tab falls back to the lowest remaining id.
    pub fn close_tab(&self, tab: TabId) -> bool {
        let mut tabs = self.tabs.write();
        let removed = tabs.remove(&tab).is_some();
        if removed {
            let mut active = self.active.write();
            if *active == Some(tab) {
                *active = tabs.keys().next().copied();
            }
        }
        removed
    }

    pub fn activate(&self, tab: TabId) -> Result<()> {
        if !self.tabs.read().contains_key(&tab) {
            return Err(Error::Injection(format!("No tab with id: {}", tab)));
        }
        *self.active.write() = Some(tab);
        Ok(())
    }

    /// Navigate a tab to a new page. Injected scripts do not survive navigation.
    pub fn navigate(&self, tab: TabId, page: PageSnapshot) -> Result<()> {
        let mut tabs = self.tabs.write();
        let entry = tabs
            .get_mut(&tab)
            .ok_or_else(|| Error::Injection(format!("No tab with id: {}", tab)))?;
        info!("Tab {} navigated to {}", tab, page.url);
        entry.page = Arc::new(page);
        entry.inspector = None;
        Ok(())
    }

    pub fn current_tab(&self) -> Option<TabId> {
        *self.active.read()
    }

    pub fn has_inspector(&self, tab: TabId) -> bool {
        self.tabs
            .read()
            .get(&tab)
            .map_or(false, |t| t.inspector.is_some())
    }
}

impl Default for SimulatedBrowser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptInjector for SimulatedBrowser {
    async fn inject_inspector(&self, tab: TabId) -> Result<bool> {
        let mut tabs = self.tabs.write();
        let entry = tabs
            .get_mut(&tab)
            .ok_or_else(|| Error::Injection(format!("No tab with id: {}", tab)))?;
        let replaced = entry
            .inspector
            .replace(PageInspector::new(entry.page.clone()))
            .is_some();
        Ok(replaced)
    }
}

#[async_trait]
impl TabHost for SimulatedBrowser {
    async fn active_tab(&self) -> Option<TabId> {
        self.current_tab()
    }

    async fn send_message(&self, tab: TabId, message: Value) -> Option<Value> {
        let inspector = self.tabs.read().get(&tab).and_then(|t| t.inspector.clone());
        match inspector {
            Some(inspector) => {
                let reply = inspector.handle_message(&message).resolve_json().await;
                debug!("Tab {} replied: {:?}", tab, reply);
                reply
            }
            None => {
                warn!(
                    "Could not establish connection to tab {}: receiving end does not exist",
                    tab
                );
                None
            }
        }
    }
}
