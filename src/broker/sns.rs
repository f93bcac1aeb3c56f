//! SNS binding of the [`Publisher`] port.

use async_trait::async_trait;
use aws_sdk_sns::Client;
use log::debug;

use super::{PublishError, Publisher};

/// Publishes to an AWS SNS topic. The destination is the topic ARN.
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    async fn publish(&self, message: &str, destination: &str) -> Result<String, PublishError> {
        debug!("publishing to topic {destination}");

        let output = self
            .client
            .publish()
            .topic_arn(destination)
            .message(message)
            .send()
            .await
            .map_err(|err| PublishError {
                destination: destination.to_string(),
                source: err.into(),
            })?;

        let message_id = output.message_id().unwrap_or_default().to_string();
        debug!("published message {message_id}");
        Ok(message_id)
    }
}
