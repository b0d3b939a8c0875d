//! Capability registry: the process-wide catalog of node types.
//!
//! [`NodeRegistry`] is built once at startup by the node loader and then
//! shared read-only (behind `Arc`) with the HTTP layer. It caches nothing:
//! [`NodeRegistry::list_all`] asks every node to describe itself again on
//! each call.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{NodeError, RegistryError};
use crate::node::{Describable, NodeDescriptor};
use crate::types::TypeId;

/// A node type that failed to describe itself during a catalog query.
#[derive(Debug)]
pub struct DescriptorFailure {
    pub type_id: TypeId,
    pub error: NodeError,
}

/// Snapshot produced by [`NodeRegistry::list_all`].
///
/// `nodes` holds every type that described itself successfully, in
/// registration order. Types that failed are listed in `failures` instead.
#[derive(Debug, Default)]
pub struct Catalog {
    pub nodes: IndexMap<TypeId, NodeDescriptor>,
    pub failures: Vec<DescriptorFailure>,
}

/// Mapping from node type id to its self-description provider.
#[derive(Default)]
pub struct NodeRegistry {
    nodes: IndexMap<TypeId, Arc<dyn Describable>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type under `type_id`.
    ///
    /// A duplicate id is rejected and the first registration is kept.
    pub fn register<N>(&mut self, type_id: impl Into<TypeId>, node: N) -> Result<(), RegistryError>
    where
        N: Describable + 'static,
    {
        let type_id = type_id.into();

        if self.nodes.contains_key(&type_id) {
            tracing::warn!(type_id = %type_id, "Rejected duplicate node type registration");
            return Err(RegistryError::Duplicate { type_id });
        }

        tracing::debug!(type_id = %type_id, "Registered node type");
        self.nodes.insert(type_id, Arc::new(node));
        Ok(())
    }

    /// Describe every registered node type.
    ///
    /// A node whose description fails (or panics) is left out of
    /// [`Catalog::nodes`] and recorded in [`Catalog::failures`]; the rest of
    /// the catalog is unaffected.
    pub fn list_all(&self) -> Catalog {
        let mut catalog = Catalog::default();

        for (type_id, node) in &self.nodes {
            match describe_isolated(type_id, node.as_ref()) {
                Ok(descriptor) => {
                    catalog.nodes.insert(type_id.clone(), descriptor);
                }
                Err(error) => {
                    tracing::warn!(
                        type_id = %type_id,
                        error = %error,
                        "Omitting node type from catalog"
                    );
                    catalog.failures.push(DescriptorFailure {
                        type_id: type_id.clone(),
                        error,
                    });
                }
            }
        }

        catalog
    }

    /// Describe a single node type, or `None` if it is not registered.
    pub fn describe(&self, type_id: &str) -> Option<Result<NodeDescriptor, NodeError>> {
        self.nodes
            .get(type_id)
            .map(|node| describe_isolated(type_id, node.as_ref()))
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.nodes.contains_key(type_id)
    }

    /// Registered type ids in registration order.
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Run a node's self-description, converting a panic into [`NodeError::Panicked`].
fn describe_isolated(type_id: &str, node: &dyn Describable) -> Result<NodeDescriptor, NodeError> {
    match panic::catch_unwind(AssertUnwindSafe(|| NodeDescriptor::describe(type_id, node))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(NodeError::Panicked(message))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
