//! Scalar access to a single position in the document tree.

use serde_json::Value;

use crate::error::NodeError;

/// A matched position in the document tree.
///
/// Rules only ever see nodes through this trait, so they stay independent of
/// the JSON representation behind it.
pub trait Node {
    /// Read the node as a string.
    fn get_string(&self) -> Result<&str, NodeError>;

    /// Overwrite the node's string value.
    ///
    /// Normalization rewrites values in place and never changes a node's
    /// type, so writing to a node that does not currently hold a string
    /// fails.
    fn set_string(&mut self, value: String) -> Result<(), NodeError>;
}

/// [`Node`] over a mutable `serde_json` value.
#[derive(Debug)]
pub struct ValueNode<'a> {
    value: &'a mut Value,
}

impl<'a> ValueNode<'a> {
    pub fn new(value: &'a mut Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        self.value
    }
}

impl Node for ValueNode<'_> {
    fn get_string(&self) -> Result<&str, NodeError> {
        self.value.as_str().ok_or(NodeError::NotAString {
            found: type_name(self.value),
        })
    }

    fn set_string(&mut self, value: String) -> Result<(), NodeError> {
        match &mut *self.value {
            Value::String(s) => {
                *s = value;
                Ok(())
            }
            other => Err(NodeError::NotAString {
                found: type_name(other),
            }),
        }
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
