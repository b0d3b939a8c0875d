//! Notification bus for the aicreate server.
//!
//! - [`NotificationBus`] -- non-blocking, strictly ordered publish side of an
//!   unbounded `tokio::sync::mpsc` channel.
//! - [`NotificationReceiver`] -- the single consuming end, owned by the drain
//!   loop.
//! - [`NotificationMessage`] -- the message envelope and its wire form.

pub mod bus;

pub use bus::{event_types, NotificationBus, NotificationMessage, NotificationReceiver};
