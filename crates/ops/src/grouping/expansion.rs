//! Group expansion state.

use crate::sorting::{SortingExpression, SortingStrategy};
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use gridkit_core::Value;

/// One level of a group hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupByKey {
    pub field_name: String,
    pub value: Value,
}

impl GroupByKey {
    pub fn new(field_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
        }
    }
}

/// Whether the group identified by `hierarchy` is expanded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupByExpandState {
    pub hierarchy: Vec<GroupByKey>,
    pub expanded: bool,
}

impl GroupByExpandState {
    pub fn new(hierarchy: Vec<GroupByKey>, expanded: bool) -> Self {
        Self {
            hierarchy,
            expanded,
        }
    }

    /// Returns true if this entry describes the group at `hierarchy`.
    pub fn matches(&self, hierarchy: &[GroupByKey]) -> bool {
        is_hierarchy_match(&self.hierarchy, hierarchy)
    }
}

/// Two hierarchies match when they have the same length and every level has
/// the same field name and value.
pub fn is_hierarchy_match(h1: &[GroupByKey], h2: &[GroupByKey]) -> bool {
    h1.len() == h2.len()
        && h1
            .iter()
            .zip(h2)
            .all(|(a, b)| a.field_name == b.field_name && a.value == b.value)
}

/// Like `is_hierarchy_match`, but a level grouped by `expressions[level]`
/// compares its values the way grouping does, so `Int64(2)` matches
/// `Float64(2.0)` and case-folded strings match. Other levels compare
/// strictly.
pub fn is_hierarchy_match_by(
    h1: &[GroupByKey],
    h2: &[GroupByKey],
    expressions: &[SortingExpression],
    strategy: &dyn SortingStrategy,
) -> bool {
    h1.len() == h2.len()
        && h1.iter().zip(h2).enumerate().all(|(level, (a, b))| {
            match expressions.get(level).filter(|e| e.field_name == a.field_name) {
                Some(expression) => {
                    a.field_name == b.field_name
                        && is_key_match(a, &b.value, expression, strategy)
                }
                None => a == b,
            }
        })
}

/// Returns true if `key` names a group of `expression` whose key is `value`.
pub fn is_key_match(
    key: &GroupByKey,
    value: &Value,
    expression: &SortingExpression,
    strategy: &dyn SortingStrategy,
) -> bool {
    key.field_name == expression.field_name
        && strategy.compare_values(&key.value, value, expression) == Ordering::Equal
}
