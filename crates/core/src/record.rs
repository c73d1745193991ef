//! Record structure.
//!
//! A record is an ordered mapping from field name to value. No schema is
//! enforced; fields are looked up by name at evaluation time.

use crate::error::{Error, Result};
use crate::value::Value;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a record (the grid's primary key).
pub type RecordId = u64;

/// Shared handle to a record. Pipelines pass these around so grouping can
/// reference one record from several places without copying it.
pub type RecordRef = Rc<Record>;

/// Global record ID counter for generating unique record IDs.
static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(0);

/// Gets the next unique record ID.
pub fn next_record_id() -> RecordId {
    NEXT_RECORD_ID.fetch_add(1, Ordering::SeqCst)
}

/// Sets the next record ID.
pub fn set_next_record_id(id: RecordId) {
    NEXT_RECORD_ID.store(id, Ordering::SeqCst);
}

/// A single data record.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Unique identifier for this record.
    id: RecordId,
    /// Field values in insertion order.
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates a new record with the given ID and fields.
    pub fn new(id: RecordId, fields: Vec<(String, Value)>) -> Self {
        Self { id, fields }
    }

    /// Creates a new record with an automatically assigned ID.
    pub fn create(fields: Vec<(String, Value)>) -> Self {
        Self::new(next_record_id(), fields)
    }

    /// Creates an empty record with the given ID.
    pub fn empty(id: RecordId) -> Self {
        Self::new(id, Vec::new())
    }

    /// Builder-style setter, used heavily when assembling fixtures.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value.into());
        self
    }

    /// Wraps the record in a shared handle.
    pub fn into_ref(self) -> RecordRef {
        Rc::new(self)
    }

    /// Returns the record ID.
    #[inline]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Gets the value of a field, or None when the record has no such field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Gets the value of a field, failing when it's absent.
    pub fn try_get(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| Error::field_not_found(name))
    }

    /// Gets the value of a field, treating absence as Null.
    pub fn get_or_null(&self, name: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        self.get(name).unwrap_or(NULL)
    }

    /// Sets a field, replacing the previous value if the field exists.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the fields in insertion order.
    #[inline]
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if this record has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.fields == other.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_record_new() {
        let record = Record::empty(1).with("id", 42i64).with("name", "Alice");
        assert_eq!(record.id(), 1);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("name"), Some(&Value::String("Alice".into())));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_record_set_replaces() {
        let mut record = Record::empty(1).with("id", 1i64);
        record.set("id", Value::Int64(100));
        assert_eq!(record.get("id"), Some(&Value::Int64(100)));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_record_try_get() {
        let record = Record::new(1, vec![("a".into(), Value::Boolean(true))]);
        assert!(record.try_get("a").is_ok());
        assert!(matches!(record.try_get("b"), Err(Error::FieldNotFound { .. })));
        assert!(record.get_or_null("b").is_null());
    }

    #[test]
    fn test_record_create() {
        set_next_record_id(100);
        let r1 = Record::create(vec![]);
        let r2 = Record::create(vec![]);
        assert_eq!(r2.id(), r1.id() + 1);
    }

    #[test]
    fn test_field_names_keep_order() {
        let record = Record::empty(1).with("b", 1i64).with("a", 2i64);
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
