//! An in-memory broker for tests. The publish side feeds straight into
//! the receive side the way a topic subscribed to a queue would, and
//! every stage can be scripted to fail.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use super::{DeleteError, PublishError, Publisher, ReceiveError, ReceivedMessage, Receiver};

#[derive(Default)]
struct State {
    pending: VecDeque<ReceivedMessage>,
    deleted: Vec<String>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
    next_id: AtomicU64,
    publish_calls: AtomicU64,
    receive_calls: AtomicU64,
    /// Receive calls left that return an empty batch before delivery.
    empty_polls: AtomicU64,
    fail_publish: AtomicBool,
    fail_receive: AtomicBool,
    fail_delete: AtomicBool,
}

/// A publish/receive pair backed by one in-process queue. Clones share
/// the queue, so one instance can serve as both ports of a session
/// while the test keeps a handle for assertions.
#[derive(Clone, Default)]
pub struct MockBroker {
    inner: Arc<Inner>,
}

impl MockBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `polls` receive calls return an empty batch.
    pub fn delay_delivery(&self, polls: u64) {
        self.inner.empty_polls.store(polls, Ordering::SeqCst);
    }

    pub fn fail_publish(&self) {
        self.inner.fail_publish.store(true, Ordering::SeqCst);
    }

    pub fn fail_receive(&self) {
        self.inner.fail_receive.store(true, Ordering::SeqCst);
    }

    pub fn fail_delete(&self) {
        self.inner.fail_delete.store(true, Ordering::SeqCst);
    }

    /// Drop a raw body straight into the queue, bypassing the publish
    /// side. For malformed envelopes and pre-existing traffic.
    pub fn enqueue_raw(&self, body: &str) {
        let handle = format!("handle-{}", self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let mut state = self.inner.state.lock().unwrap();
        state.pending.push_back(ReceivedMessage {
            body: body.to_string(),
            handle,
        });
    }

    /// Receipt handles deleted so far, in deletion order.
    pub fn deleted(&self) -> Vec<String> {
        self.inner.state.lock().unwrap().deleted.clone()
    }

    /// Messages still sitting in the queue.
    pub fn pending(&self) -> usize {
        self.inner.state.lock().unwrap().pending.len()
    }

    pub fn publish_count(&self) -> u64 {
        self.inner.publish_calls.load(Ordering::SeqCst)
    }

    pub fn receive_count(&self) -> u64 {
        self.inner.receive_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for MockBroker {
    async fn publish(&self, message: &str, destination: &str) -> Result<String, PublishError> {
        self.inner.publish_calls.fetch_add(1, Ordering::SeqCst);

        if self.inner.fail_publish.load(Ordering::SeqCst) {
            return Err(PublishError {
                destination: destination.to_string(),
                source: "injected publish failure".into(),
            });
        }

        let id = format!("mock-msg-{}", self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let envelope = json!({
            "Type": "Notification",
            "MessageId": id,
            "TopicArn": destination,
            "Subject": "",
            "Message": message,
            "Timestamp": "2024-05-01T12:00:00.000Z",
            "SignatureVersion": "1",
            "Signature": "",
            "SigningCertURL": "",
            "UnsubscribeURL": "",
        });

        let mut state = self.inner.state.lock().unwrap();
        state.pending.push_back(ReceivedMessage {
            body: envelope.to_string(),
            handle: format!("handle-{id}"),
        });
        Ok(id)
    }
}

#[async_trait]
impl Receiver for MockBroker {
    async fn receive(&self, source: &str) -> Result<Vec<ReceivedMessage>, ReceiveError> {
        self.inner.receive_calls.fetch_add(1, Ordering::SeqCst);

        if self.inner.fail_receive.load(Ordering::SeqCst) {
            return Err(ReceiveError {
                queue: source.to_string(),
                source: "injected receive failure".into(),
            });
        }

        let remaining = self.inner.empty_polls.load(Ordering::SeqCst);
        if remaining > 0 {
            self.inner.empty_polls.store(remaining - 1, Ordering::SeqCst);
            return Ok(Vec::new());
        }

        // Receiving does not consume; only delete removes a message.
        let state = self.inner.state.lock().unwrap();
        Ok(state.pending.iter().cloned().collect())
    }

    async fn delete(&self, _source: &str, handle: &str) -> Result<(), DeleteError> {
        if self.inner.fail_delete.load(Ordering::SeqCst) {
            return Err(DeleteError::Transport("injected delete failure".into()));
        }

        let mut state = self.inner.state.lock().unwrap();
        match state.pending.iter().position(|m| m.handle == handle) {
            Some(index) => {
                state.pending.remove(index);
                state.deleted.push(handle.to_string());
                Ok(())
            }
            None => Err(DeleteError::HandleInvalid),
        }
    }
}
