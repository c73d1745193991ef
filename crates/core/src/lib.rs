//! Gridkit Core - value and record types shared by the gridkit pipeline.
//!
//! - `Value`: a field value (Null, Boolean, Int64, Float64, String, DateTime,
//!   nested Records)
//! - `Record`: an ordered field-name to value mapping with a unique identifier
//! - `DataType`: the column data types that select filtering conditions
//! - `Error`: error types for fallible accessors
//!
//! # Example
//!
//! ```rust
//! use gridkit_core::{Record, Value};
//!
//! let record = Record::empty(1)
//!     .with("name", "Alice")
//!     .with("age", 31i64);
//!
//! assert_eq!(record.id(), 1);
//! assert_eq!(record.get("name"), Some(&Value::String("Alice".into())));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod record;
mod types;
mod value;

pub use error::{Error, Result};
pub use record::{next_record_id, set_next_record_id, Record, RecordId, RecordRef};
pub use types::DataType;
pub use value::{Value, MILLIS_PER_DAY};
