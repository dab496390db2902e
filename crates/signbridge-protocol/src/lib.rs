//! Cross-context protocol: message shapes exchanged between the panel,
//! the page inspector, the background context and the translation backend.
//!
//! Every handler answers through [`MessageReply`], which makes the
//! "respond now or respond later" decision explicit in the type.

pub mod messages;
pub mod reply;

pub use messages::*;
pub use reply::{MessageReply, PendingReply, Responder};
