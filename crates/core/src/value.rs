//! Value type definitions.
//!
//! This module defines the `Value` enum which represents any value a record
//! field can hold.

use crate::error::{Error, Result};
use crate::record::{Record, RecordRef};
use crate::types::DataType;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

/// Milliseconds in one calendar day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// A value stored in a record field.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// DateTime stored as Unix timestamp in milliseconds
    DateTime(i64),
    /// Nested records, e.g. the children of a tree-grid row
    Records(Vec<RecordRef>),
}

impl Value {
    /// Returns the column data type of this value, or None if it's Null or a
    /// nested record list.
    pub fn data_type(&self) -> Option<DataType> {
        DataType::of(self)
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for Null and for the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the boolean value if this is a Boolean, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i64 value if this is an Int64, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f64 value if this is a Float64, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns either numeric variant widened to f64.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the datetime timestamp if this is a DateTime, None otherwise.
    pub fn as_datetime(&self) -> Option<i64> {
        match self {
            Value::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the day number (days since the Unix epoch) of a DateTime.
    pub fn as_day(&self) -> Option<i64> {
        self.as_datetime().map(|ms| ms.div_euclid(MILLIS_PER_DAY))
    }

    /// Returns the nested records if this is a Records value.
    pub fn as_records(&self) -> Option<&[RecordRef]> {
        match self {
            Value::Records(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Renders the value as display text. Nested records render as empty.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null | Value::Records(_) => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Int64(i) => i.to_string(),
            Value::Float64(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::DateTime(d) => d.to_string(),
        }
    }

    /// Compares two values, folding string case when `ignore_case` is set.
    pub fn cmp_with_case(&self, other: &Value, ignore_case: bool) -> Ordering {
        match (self, other) {
            (Value::String(a), Value::String(b)) if ignore_case => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            _ => self.cmp(other),
        }
    }

    /// Returns a type ordering value for comparing different types.
    fn type_order(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Int64(_) => 2,
            Value::Float64(_) => 3,
            Value::String(_) => 4,
            Value::DateTime(_) => 5,
            Value::Records(_) => 6,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Records(a), Value::Records(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Int64(i) => i.hash(state),
            // Equal floats must hash alike: one NaN, and -0.0 as 0.0
            Value::Float64(f) => {
                let bits = if f.is_nan() {
                    f64::NAN.to_bits()
                } else if *f == 0.0 {
                    0
                } else {
                    f.to_bits()
                };
                bits.hash(state)
            }
            Value::String(s) => s.hash(state),
            Value::DateTime(d) => d.hash(state),
            Value::Records(r) => {
                r.len().hash(state);
                for record in r {
                    record.id().hash(state);
                }
            }
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            // Cross-type numeric comparisons
            (Value::Int64(a), Value::Float64(b)) => {
                if b.is_nan() {
                    Ordering::Less
                } else {
                    (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
                }
            }
            (Value::Float64(a), Value::Int64(b)) => {
                if a.is_nan() {
                    Ordering::Greater
                } else {
                    a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
                }
            }
            (Value::Float64(a), Value::Float64(b)) => {
                // NaN sorts after every other number
                match (a.is_nan(), b.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
                }
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Records(a), Value::Records(b)) => a.len().cmp(&b.len()),
            // Different types: order by type discriminant
            _ => self.type_order().cmp(&other.type_order()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<RecordRef>> for Value {
    fn from(v: Vec<RecordRef>) -> Self {
        Value::Records(v)
    }
}

impl From<Vec<Record>> for Value {
    fn from(v: Vec<Record>) -> Self {
        Value::Records(v.into_iter().map(Record::into_ref).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

macro_rules! impl_try_from_value {
    ($target:ty, $accessor:ident, $expected:expr) => {
        impl TryFrom<&Value> for $target {
            type Error = Error;

            fn try_from(value: &Value) -> Result<Self> {
                value
                    .$accessor()
                    .ok_or_else(|| Error::type_mismatch($expected, value.data_type()))
            }
        }
    };
}

impl_try_from_value!(bool, as_bool, DataType::Boolean);
impl_try_from_value!(i64, as_i64, DataType::Number);
impl_try_from_value!(f64, as_number, DataType::Number);

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<Self> {
        value
            .as_str()
            .ok_or_else(|| Error::type_mismatch(DataType::String, value.data_type()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_value_null() {
        let v = Value::Null;
        assert_eq!(v.data_type(), None);
        assert!(v.is_null());
        assert!(v.is_empty());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::Int64(100).as_i64(), Some(100));
        assert_eq!(Value::Float64(3.5).as_f64(), Some(3.5));
        assert_eq!(Value::Int64(2).as_number(), Some(2.0));
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::DateTime(1234567890).as_datetime(), Some(1234567890));
        assert_eq!(Value::DateTime(MILLIS_PER_DAY + 5).as_day(), Some(1));
        assert_eq!(Value::DateTime(-1).as_day(), Some(-1));
    }

    #[test]
    fn test_try_from_value() {
        assert_eq!(i64::try_from(&Value::Int64(7)), Ok(7));
        assert_eq!(f64::try_from(&Value::Int64(2)), Ok(2.0));
        assert_eq!(<&str>::try_from(&Value::from("x")), Ok("x"));
        assert_eq!(
            bool::try_from(&Value::from("x")),
            Err(Error::TypeMismatch {
                expected: DataType::Boolean,
                got: Some(DataType::String),
            })
        );
        assert!(i64::try_from(&Value::Null).is_err());
    }

    #[test]
    fn test_value_ordering() {
        assert!(Value::Int64(1) < Value::Int64(2));
        assert!(Value::Int64(1) < Value::Float64(1.5));
        assert!(Value::Float64(f64::NAN) > Value::Float64(1e300));
        assert!(Value::String("a".into()) < Value::String("b".into()));
        assert!(Value::Null < Value::Int64(0));
    }

    #[test]
    fn test_cmp_with_case() {
        let upper = Value::String("Apple".into());
        let lower = Value::String("apple".into());
        assert_eq!(upper.cmp_with_case(&lower, true), Ordering::Equal);
        assert_eq!(upper.cmp_with_case(&lower, false), Ordering::Less);
    }

    #[test]
    fn test_value_from_impls() {
        let v: Value = 42i32.into();
        assert_eq!(v.as_i64(), Some(42));

        let v: Value = "hello".into();
        assert_eq!(v.as_str(), Some("hello"));

        let v: Value = None::<i64>.into();
        assert!(v.is_null());

        let v: Value = vec![Record::new(1, vec![])].into();
        assert_eq!(v.as_records().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_float_hash_matches_eq() {
        // records the hashed bytes
        struct Bytes(Vec<u8>);

        impl Hasher for Bytes {
            fn finish(&self) -> u64 {
                0
            }

            fn write(&mut self, bytes: &[u8]) {
                self.0.extend_from_slice(bytes);
            }
        }

        fn hash_of(value: &Value) -> Vec<u8> {
            let mut hasher = Bytes(Vec::new());
            value.hash(&mut hasher);
            hasher.0
        }

        assert_eq!(Value::Float64(0.0), Value::Float64(-0.0));
        assert_eq!(hash_of(&Value::Float64(0.0)), hash_of(&Value::Float64(-0.0)));

        let quiet = f64::NAN;
        let payload = f64::from_bits(f64::NAN.to_bits() | 1);
        assert_eq!(Value::Float64(quiet), Value::Float64(payload));
        assert_eq!(hash_of(&Value::Float64(quiet)), hash_of(&Value::Float64(payload)));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Int64(7).to_text(), "7");
        assert_eq!(Value::Boolean(false).to_text(), "false");
        assert_eq!(Value::Null.to_text(), "");
    }
}
