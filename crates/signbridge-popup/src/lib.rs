//! Translation requester: the user-facing panel.
//!
//! On a single user action it asks the active tab's page inspector for a
//! video URL, posts that URL to the translation backend and renders the
//! outcome as a status line. Every failure ends in a rendered status.

pub mod backend;
pub mod requester;
pub mod status;
pub mod tabs;

pub use backend::{HttpBackend, TranslationBackend};
pub use requester::{TranslationRequester, Trigger};
pub use status::{MemoryDisplay, StatusDisplay, StatusTone, StatusUpdate, TranslationStatus};
pub use tabs::TabHost;
