//! SQS binding of the [`Receiver`] port.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use log::{debug, info};

use super::{DeleteError, ReceiveError, ReceivedMessage, Receiver};

/// Receive-side knobs, forwarded verbatim to SQS.
#[derive(Debug, Clone)]
pub struct ReceiveConfig {
    /// Long-poll wait in seconds. Zero means short poll.
    pub wait_time_seconds: i32,
    /// How long a received message stays invisible to other receive
    /// calls before it reappears.
    pub visibility_timeout: i32,
    /// Batch size cap per receive call.
    pub max_messages: i32,
}

impl Default for ReceiveConfig {
    fn default() -> Self {
        Self {
            wait_time_seconds: 20,
            visibility_timeout: 30,
            max_messages: 1,
        }
    }
}

/// Receives from an AWS SQS queue. The source is the queue URL.
pub struct SqsReceiver {
    client: Client,
    config: ReceiveConfig,
}

impl SqsReceiver {
    pub fn new(client: Client, config: ReceiveConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Receiver for SqsReceiver {
    async fn receive(&self, source: &str) -> Result<Vec<ReceivedMessage>, ReceiveError> {
        debug!("polling queue {source}");

        let output = self
            .client
            .receive_message()
            .queue_url(source)
            .max_number_of_messages(self.config.max_messages)
            .wait_time_seconds(self.config.wait_time_seconds)
            .visibility_timeout(self.config.visibility_timeout)
            .send()
            .await
            .map_err(|err| ReceiveError {
                queue: source.to_string(),
                source: err.into(),
            })?;

        let messages = output
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|msg| ReceivedMessage {
                body: msg.body.unwrap_or_default(),
                handle: msg.receipt_handle.unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        info!("received {} message(s) from {source}", messages.len());
        Ok(messages)
    }

    async fn delete(&self, source: &str, handle: &str) -> Result<(), DeleteError> {
        debug!("deleting message from {source}");

        self.client
            .delete_message()
            .queue_url(source)
            .receipt_handle(handle)
            .send()
            .await
            .map_err(|err| {
                let handle_invalid = err
                    .as_service_error()
                    .is_some_and(|e| e.is_receipt_handle_is_invalid());
                if handle_invalid {
                    DeleteError::HandleInvalid
                } else {
                    DeleteError::Transport(err.into())
                }
            })?;

        debug!("deleted message from {source}");
        Ok(())
    }
}
