//! Notification delivery to connected clients.

pub mod router;

pub use router::NotificationRouter;
