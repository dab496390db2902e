//! SignBridge host: an in-process browser that wires the three extension
//! contexts together.

pub mod browser;
pub mod display;
pub mod extension;

pub use browser::SimulatedBrowser;
pub use display::ConsoleDisplay;
pub use extension::Extension;
