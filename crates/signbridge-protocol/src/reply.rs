//! Explicit reply contract for message handlers.
//!
//! A handler either answers immediately, promises an answer later, or
//! declines the message. The sender's wait is only abandoned when the
//! handler declines or drops its [`Responder`] without answering.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::warn;

/// What a message handler hands back to the messaging channel.
#[derive(Debug)]
pub enum MessageReply<T> {
    /// The answer is available now.
    Ready(T),
    /// The answer will be delivered later through the paired [`Responder`].
    Pending(PendingReply<T>),
    /// The handler does not answer this message.
    NoReply,
}

/// Receiving half of a deferred reply.
#[derive(Debug)]
pub struct PendingReply<T> {
    rx: oneshot::Receiver<T>,
}

/// Sending half of a deferred reply. Consumed by the first answer.
#[derive(Debug)]
pub struct Responder<T> {
    tx: oneshot::Sender<T>,
}

impl<T> Responder<T> {
    /// Deliver the answer. Returns `false` if the sender stopped waiting.
    pub fn send(self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

impl<T> PendingReply<T> {
    /// Wait for the deferred answer. `None` if the responder was dropped unanswered.
    pub async fn wait(self) -> Option<T> {
        match self.rx.await {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Message handler dropped its responder without answering");
                None
            }
        }
    }
}

impl<T> MessageReply<T> {
    /// Create a pending reply together with the responder that settles it.
    pub fn pending() -> (Responder<T>, Self) {
        let (tx, rx) = oneshot::channel();
        (Responder { tx }, Self::Pending(PendingReply { rx }))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn is_no_reply(&self) -> bool {
        matches!(self, Self::NoReply)
    }

    /// Wait for the answer, whichever way it is delivered.
    pub async fn resolve(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(pending) => pending.wait().await,
            Self::NoReply => None,
        }
    }
}

impl<T: Serialize> MessageReply<T> {
    /// Resolve and encode the answer as it would travel over the messaging channel.
    pub async fn resolve_json(self) -> Option<Value> {
        let value = self.resolve().await?;
        match serde_json::to_value(value) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!("Failed to encode reply: {}", e);
                None
            }
        }
    }
}
