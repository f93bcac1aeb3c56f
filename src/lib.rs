//! Round-trip integers through a publish/subscribe pair and keep a
//! running total.
//!
//! Each value the operator enters is published to a topic, comes back as
//! a notification on a subscribed queue, is folded into an accumulator,
//! and is then acknowledged by deleting the queue message. The broker is
//! reached only through the [`broker::Publisher`] and [`broker::Receiver`]
//! ports, so the whole pipeline can be driven by the in-memory
//! [`broker::mock::MockBroker`] in tests.

pub mod accumulator;
pub mod banner;
pub mod broker;
pub mod input;
pub mod notification;
pub mod session;
