//! Node self-description contract and the schema types it produces.
//!
//! Every node type implements [`Describable`]. The registry never inspects a
//! node beyond this trait, so node implementations can live anywhere and
//! compute their schema from whatever state they like (files on disk,
//! loaded models, feature toggles).

use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::error::NodeError;

// ---------------------------------------------------------------------------
// Type tag constants
// ---------------------------------------------------------------------------

/// Data types that flow through connections between nodes.
pub mod type_tags {
    pub const IMAGE: &str = "IMAGE";
    pub const MASK: &str = "MASK";
    pub const NUMBER: &str = "NUMBER";
    pub const INT: &str = "INT";
    pub const FLOAT: &str = "FLOAT";
    pub const STRING: &str = "STRING";
}

/// Category assigned to node types that do not declare one.
pub const DEFAULT_CATEGORY: &str = "sd";

// ---------------------------------------------------------------------------
// Input schema
// ---------------------------------------------------------------------------

/// Optional constraints attached to a typed input.
///
/// Only the fields that are set appear in the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiline: Option<bool>,
}

impl InputOptions {
    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the inclusive numeric bounds.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = Some(true);
        self
    }
}

/// The declared type of a single input parameter.
///
/// Serializes to the array shapes the client's graph editor understands:
///
/// ```text
/// ["IMAGE"]                         typed, no constraints
/// ["INT", {"default": 512, ...}]    typed with constraints
/// [["a.png", "b.png"]]              enumerated choice
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputType {
    Typed {
        tag: String,
        options: Option<InputOptions>,
    },
    Choice(Vec<String>),
}

impl InputType {
    /// A plain typed input, e.g. `InputType::of(type_tags::IMAGE)`.
    pub fn of(tag: impl Into<String>) -> Self {
        InputType::Typed {
            tag: tag.into(),
            options: None,
        }
    }

    /// A typed input carrying constraints.
    pub fn with_options(tag: impl Into<String>, options: InputOptions) -> Self {
        InputType::Typed {
            tag: tag.into(),
            options: Some(options),
        }
    }

    /// An input restricted to one of the given values.
    pub fn choice<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputType::Choice(choices.into_iter().map(Into::into).collect())
    }
}

impl Serialize for InputType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InputType::Typed { tag, options } => {
                let len = if options.is_some() { 2 } else { 1 };
                let mut seq = serializer.serialize_seq(Some(len))?;
                seq.serialize_element(tag)?;
                if let Some(options) = options {
                    seq.serialize_element(options)?;
                }
                seq.end()
            }
            InputType::Choice(choices) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(choices)?;
                seq.end()
            }
        }
    }
}

/// Input parameters of a node, split into required and optional groups.
///
/// Both groups keep declaration order; the client lays out widgets in that
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputSpec {
    pub required: IndexMap<String, InputType>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub optional: IndexMap<String, InputType>,
}

impl InputSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter.
    pub fn required(mut self, name: impl Into<String>, input: InputType) -> Self {
        self.required.insert(name.into(), input);
        self
    }

    /// Append an optional parameter.
    pub fn optional(mut self, name: impl Into<String>, input: InputType) -> Self {
        self.optional.insert(name.into(), input);
        self
    }
}

// ---------------------------------------------------------------------------
// Describable
// ---------------------------------------------------------------------------

/// Self-description contract every node type satisfies.
///
/// `input_types` is evaluated on every catalog query and may fail; the rest
/// are expected to be fixed for the lifetime of the node type.
pub trait Describable: Send + Sync {
    /// Current input schema.
    fn input_types(&self) -> Result<InputSpec, NodeError>;

    /// Output type tags, one per output slot.
    fn return_types(&self) -> &[&str];

    fn category(&self) -> Option<&str> {
        None
    }

    /// Human-readable name; the type id is used when absent.
    fn display_name(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> &str {
        ""
    }
}

/// Computed schema bundle for one node type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    pub input: InputSpec,
    pub output: Vec<String>,
    pub name: String,
    pub description: String,
    pub category: String,
}

impl NodeDescriptor {
    /// Invoke the node's self-description and assemble its descriptor.
    pub fn describe(type_id: &str, node: &dyn Describable) -> Result<Self, NodeError> {
        let input = node.input_types()?;

        Ok(Self {
            input,
            output: node.return_types().iter().map(|t| t.to_string()).collect(),
            name: node.display_name().unwrap_or(type_id).to_string(),
            description: node.description().to_string(),
            category: node.category().unwrap_or(DEFAULT_CATEGORY).to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
