//! SignBridge Core: error taxonomy and configuration shared by every context.

pub mod config;
pub mod error;

pub use config::BridgeConfig;
pub use error::{Error, Result};
