//! aicreate API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! WebSocket sessions, notification drain loop) so integration tests and the
//! binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod middleware;
pub mod notifications;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
pub mod ws;
