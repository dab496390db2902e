//! Background context: the privileged side of the extension.
//!
//! Owns the one-time install hook, injects the page inspector into tabs on
//! demand, and relays generic `fetchVideoData` messages.

pub mod messenger;

pub use messenger::{InjectionOutcome, ScriptInjector, TabMessenger};
