//! The interactive pipeline: publish a value, wait for its notification,
//! fold it into the total, acknowledge the message.

use log::debug;
use thiserror::Error;

use crate::accumulator::Accumulator;
use crate::broker::{
    DeleteError, PublishError, Publisher, ReceiveError, ReceivedMessage, Receiver,
};
use crate::notification::{Notification, ParseError};

/// Where the session publishes to and receives from.
pub struct SessionConfig {
    /// Publish target (topic ARN).
    pub destination: String,
    /// Receive target (queue URL).
    pub source: String,
}

/// A failure in one stage of the round trip. Every variant ends the
/// session under the current policy, but the stage stays identifiable
/// so a caller could choose to log and continue instead.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error(transparent)]
    Receive(#[from] ReceiveError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// One operator's accumulator session. Owns the running total and the
/// two broker ports; nothing here is process-global, so several
/// sessions can coexist.
pub struct Session {
    publisher: Box<dyn Publisher>,
    receiver: Box<dyn Receiver>,
    accumulator: Accumulator,
    config: SessionConfig,
    pushes: u64,
}

impl Session {
    pub fn new(
        publisher: Box<dyn Publisher>,
        receiver: Box<dyn Receiver>,
        config: SessionConfig,
    ) -> Self {
        Self {
            publisher,
            receiver,
            accumulator: Accumulator::default(),
            config,
            pushes: 0,
        }
    }

    /// Publish `value`, wait for the resulting notification, fold its
    /// payload into the total, and delete the queue message.
    ///
    /// Returns the new total. A failure at any stage aborts the round
    /// trip; current policy treats it as fatal to the session, and the
    /// returned [`SessionError`] names the stage.
    pub async fn push(&mut self, value: i64) -> Result<i64, SessionError> {
        let message_id = self
            .publisher
            .publish(&value.to_string(), &self.config.destination)
            .await?;
        debug!("published {value} as message {message_id}");

        let message = self.next_message().await?;
        let notification = Notification::from_json(&message.body)?;
        let delta = notification.payload_value()?;

        self.accumulator.add(delta);
        self.pushes += 1;

        self.receiver
            .delete(&self.config.source, &message.handle)
            .await?;

        Ok(self.accumulator.value())
    }

    /// Poll until the broker hands back a non-empty batch. Only the
    /// first message of the batch is consumed; the rest stay in flight
    /// and reappear once their visibility timeout lapses.
    async fn next_message(&self) -> Result<ReceivedMessage, ReceiveError> {
        loop {
            let batch = self.receiver.receive(&self.config.source).await?;
            debug!("batch of {} from {}", batch.len(), self.config.source);
            if let Some(first) = batch.into_iter().next() {
                return Ok(first);
            }
        }
    }

    /// Current running total.
    pub fn total(&self) -> i64 {
        self.accumulator.value()
    }

    /// How many values have completed the round trip.
    pub fn pushes(&self) -> u64 {
        self.pushes
    }
}
