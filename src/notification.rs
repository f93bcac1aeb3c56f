//! The notification envelope a topic delivers to subscribed queues.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a received message body could not be turned into an integer.
///
/// Envelope decoding and payload conversion are separate failure modes:
/// the payload is carried as text even when the envelope itself is fine.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body was not a well-formed notification envelope.
    #[error("malformed notification envelope")]
    InvalidEnvelope(#[from] serde_json::Error),
    /// The envelope decoded, but its payload is not a decimal integer.
    #[error("notification payload {payload:?} is not an integer")]
    NonIntegerPayload { payload: String },
}

/// One SNS-style notification envelope.
///
/// Only [`message`](Self::message) matters to the pipeline; the broker
/// metadata is carried so envelopes round-trip intact. Metadata fields
/// missing from the wire default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Notification {
    pub r#type: String,
    pub message_id: String,
    pub topic_arn: String,
    pub subject: String,
    /// The user payload: a decimal integer carried as text.
    pub message: String,
    pub timestamp: String,
    pub signature_version: String,
    pub signature: String,
    #[serde(rename = "SigningCertURL")]
    pub signing_cert_url: String,
    #[serde(rename = "UnsubscribeURL")]
    pub unsubscribe_url: String,
}

impl Notification {
    /// Decode one received message body.
    pub fn from_json(raw: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The integer carried in the payload.
    pub fn payload_value(&self) -> Result<i64, ParseError> {
        self.message
            .parse::<i64>()
            .map_err(|_| ParseError::NonIntegerPayload {
                payload: self.message.clone(),
            })
    }
}
