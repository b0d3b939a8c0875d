use crate::error::NodeError;
use crate::node::{type_tags, Describable, InputSpec, InputType};

const CATEGORY_BASIC: &str = "basic";

/// Forwards an image unchanged.
pub struct ImagePassthrough;

impl Describable for ImagePassthrough {
    fn input_types(&self) -> Result<InputSpec, NodeError> {
        Ok(InputSpec::new().required("image", InputType::of(type_tags::IMAGE)))
    }

    fn return_types(&self) -> &[&str] {
        &[type_tags::IMAGE]
    }

    fn category(&self) -> Option<&str> {
        Some(CATEGORY_BASIC)
    }
}

/// Forwards a number unchanged.
pub struct NumberPassthrough;

impl Describable for NumberPassthrough {
    fn input_types(&self) -> Result<InputSpec, NodeError> {
        Ok(InputSpec::new().required("value", InputType::of(type_tags::NUMBER)))
    }

    fn return_types(&self) -> &[&str] {
        &[type_tags::NUMBER]
    }

    fn category(&self) -> Option<&str> {
        Some(CATEGORY_BASIC)
    }
}
