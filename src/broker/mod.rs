pub mod mock;
pub mod sns;
pub mod sqs;

use async_trait::async_trait;
use thiserror::Error;

/// Transport error surfaced unmodified from a concrete broker binding.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One message pulled from a queue: the raw body plus the opaque
/// acknowledgment handle that deletes exactly this delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub body: String,
    pub handle: String,
}

#[derive(Debug, Error)]
#[error("publish to {destination} failed")]
pub struct PublishError {
    pub destination: String,
    #[source]
    pub source: BoxError,
}

#[derive(Debug, Error)]
#[error("receive from {queue} failed")]
pub struct ReceiveError {
    pub queue: String,
    #[source]
    pub source: BoxError,
}

#[derive(Debug, Error)]
pub enum DeleteError {
    /// The handle no longer refers to an in-flight message (already
    /// deleted, or expired). Non-fatal by contract; callers decide.
    #[error("receipt handle is no longer valid")]
    HandleInvalid,
    #[error("delete failed")]
    Transport(#[source] BoxError),
}

/// Sends one text message to a named destination (topic). Delivery
/// guarantees are whatever the broker offers; no retry at this layer.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Returns the broker-assigned id of the published message.
    async fn publish(&self, message: &str, destination: &str) -> Result<String, PublishError>;
}

/// Retrieves pending messages from a source (queue) and acknowledges
/// consumption by deleting them one handle at a time.
#[async_trait]
pub trait Receiver: Send + Sync {
    /// One poll against the source. An empty batch means "nothing yet",
    /// not failure; callers are expected to poll again.
    async fn receive(&self, source: &str) -> Result<Vec<ReceivedMessage>, ReceiveError>;

    /// Delete one received message by its handle.
    async fn delete(&self, source: &str, handle: &str) -> Result<(), DeleteError>;
}
