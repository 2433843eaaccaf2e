use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Kind of a JSON value, used to report what was found where a status was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while mapping a [`Problem`](crate::Problem) to or from JSON.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProblemError {
    /// Input is not valid JSON or its top level is not an object
    #[error("malformed problem document: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// `status` is present but cannot be converted to an integer
    #[error("invalid status type: {0}")]
    InvalidStatusType(JsonKind),

    /// The problem could not be encoded, e.g. an extension value has no JSON representation
    #[error("failed to encode problem: {0}")]
    Encoding(String),
}
