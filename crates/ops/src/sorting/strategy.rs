//! Pluggable sorting strategies.

use super::SortingExpression;
use alloc::vec::Vec;
use core::cmp::Ordering;
use gridkit_core::{Record, RecordRef, Value};

/// Orders records by a sequence of sorting expressions.
///
/// The first expression is the primary key; later expressions only break
/// ties. Implementations must be stable: records that compare equal keep
/// their input order, which grouping relies on.
pub trait SortingStrategy {
    /// Compares two values of the field named by `expression`, without
    /// applying its direction.
    fn compare_values(&self, a: &Value, b: &Value, expression: &SortingExpression) -> Ordering {
        expression.compare_values(a, b)
    }

    /// Compares two records by every active expression, in order.
    fn compare(&self, a: &Record, b: &Record, expressions: &[SortingExpression]) -> Ordering {
        for expression in expressions.iter().filter(|e| e.is_active()) {
            let a_val = a.get_or_null(&expression.field_name);
            let b_val = b.get_or_null(&expression.field_name);
            let cmp = self.compare_values(a_val, b_val, expression);
            if cmp != Ordering::Equal {
                return expression.dir.apply(cmp);
            }
        }
        Ordering::Equal
    }

    /// Sorts the records.
    fn sort(
        &self,
        mut records: Vec<RecordRef>,
        expressions: &[SortingExpression],
    ) -> Vec<RecordRef> {
        if expressions.iter().any(|e| e.is_active()) {
            // sort_by is a stable merge sort
            records.sort_by(|a, b| self.compare(a, b, expressions));
        }
        records
    }
}

/// The default strategy: natural value order with optional case folding.
#[derive(Clone, Copy, Debug, Default)]
pub struct StableSortingStrategy;

impl SortingStrategy for StableSortingStrategy {}
