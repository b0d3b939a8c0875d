//! Built-in node types and the loader that registers them.
//!
//! Sub-modules:
//! - [`basic`] -- passthrough nodes used by the default graph.
//! - [`image`] -- image loading and scaling nodes.

pub mod basic;
pub mod image;

use std::path::Path;

use crate::error::RegistryError;
use crate::registry::NodeRegistry;

/// Register every built-in node type.
///
/// `input_dir` is the directory [`image::LoadImage`] offers files from.
/// A duplicate id aborts loading; callers should treat that as fatal.
pub fn register_builtin_nodes(
    registry: &mut NodeRegistry,
    input_dir: &Path,
) -> Result<(), RegistryError> {
    registry.register("ImagePassthrough", basic::ImagePassthrough)?;
    registry.register("NumberPassthrough", basic::NumberPassthrough)?;
    registry.register("LoadImage", image::LoadImage::new(input_dir))?;
    registry.register("ImageScale", image::ImageScale)?;

    tracing::info!(count = registry.len(), "Built-in node types registered");
    Ok(())
}
