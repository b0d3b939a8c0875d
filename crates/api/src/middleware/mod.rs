//! Request/response middleware.
//!
//! - [`cache_control::cache_control`] -- disables caching of the client bundle.

pub mod cache_control;
