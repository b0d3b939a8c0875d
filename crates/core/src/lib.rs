//! Domain core for the aicreate server.
//!
//! - [`node`] -- the [`Describable`](node::Describable) contract and schema types.
//! - [`registry`] -- [`NodeRegistry`](registry::NodeRegistry), the catalog of node types.
//! - [`nodes`] -- built-in node types and their loader.
//! - [`queue`] -- the [`PromptQueue`](queue::PromptQueue) seam.

pub mod error;
pub mod node;
pub mod nodes;
pub mod queue;
pub mod registry;
pub mod types;
