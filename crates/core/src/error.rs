/// Failure raised by a node type while describing itself.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("I/O error while describing node: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource unavailable: {0}")]
    Unavailable(String),

    #[error("Node description panicked: {0}")]
    Panicked(String),
}

/// Configuration-time failure while building the node registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Node type already registered: {type_id}")]
    Duplicate { type_id: String },
}
