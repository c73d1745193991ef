//! Column data types.
//!
//! A column's data type picks the family of filtering conditions that applies
//! to it. Records themselves are untyped; values carry their own variant.

use crate::value::Value;

/// Logical data type of a grid column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// UTF-8 text
    String,
    /// Integer or floating point number
    Number,
    /// true/false
    Boolean,
    /// Date and time stored as Unix timestamp (milliseconds)
    Date,
}

impl DataType {
    /// Returns the data type a value naturally belongs to, or None for Null
    /// and nested record lists.
    pub fn of(value: &Value) -> Option<DataType> {
        match value {
            Value::String(_) => Some(DataType::String),
            Value::Int64(_) | Value::Float64(_) => Some(DataType::Number),
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::DateTime(_) => Some(DataType::Date),
            Value::Null | Value::Records(_) => None,
        }
    }

    /// Returns the lowercase name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
        }
    }
}
