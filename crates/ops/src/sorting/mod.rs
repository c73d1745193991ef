//! Sorting engine.
//!
//! `sort` orders a record collection by a `SortingState`: an ordered list of
//! expressions plus an optional strategy. Unset expression options and a
//! missing strategy inherit from `StateDefaults`.

mod expression;
mod strategy;

pub use expression::{Comparer, SortingDirection, SortingExpression};
pub use strategy::{SortingStrategy, StableSortingStrategy};

use crate::defaults::StateDefaults;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use gridkit_core::RecordRef;

/// Sorting configuration for one grid.
#[derive(Clone, Default)]
pub struct SortingState {
    pub expressions: Vec<SortingExpression>,
    pub strategy: Option<Rc<dyn SortingStrategy>>,
}

impl SortingState {
    pub fn new(expressions: Vec<SortingExpression>) -> Self {
        Self {
            expressions,
            strategy: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Rc<dyn SortingStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Returns the position of the expression for `field_name`.
    pub fn find_index(&self, field_name: &str) -> Option<usize> {
        self.expressions
            .iter()
            .position(|e| e.field_name == field_name)
    }

    /// Returns a new state with `expression` applied.
    ///
    /// A `None` direction removes the field's expression. An existing
    /// expression for the field is replaced where it stands, so its
    /// precedence is kept; otherwise the expression is appended.
    pub fn with_expression(&self, expression: SortingExpression) -> Self {
        let mut next = self.clone();
        let existing = next.find_index(&expression.field_name);
        match (existing, expression.is_active()) {
            (Some(index), false) => {
                next.expressions.remove(index);
            }
            (None, false) => {}
            (Some(index), true) => next.expressions[index] = expression,
            (None, true) => next.expressions.push(expression),
        }
        next
    }

    /// Applies each expression in turn, as `with_expression` does.
    pub fn with_expressions(
        &self,
        expressions: impl IntoIterator<Item = SortingExpression>,
    ) -> Self {
        expressions
            .into_iter()
            .fold(self.clone(), |state, expression| state.with_expression(expression))
    }

    /// Returns a new state without any sort on `field_name`.
    pub fn without_field(&self, field_name: &str) -> Self {
        self.with_expression(SortingExpression::none(field_name))
    }

    /// Resolves defaults into the expressions and the strategy.
    pub(crate) fn resolve(
        &self,
        defaults: &StateDefaults,
    ) -> (Vec<SortingExpression>, Rc<dyn SortingStrategy>) {
        let expressions = self
            .expressions
            .iter()
            .filter(|e| e.is_active())
            .map(|e| e.merged_with(defaults.sort_ignore_case))
            .collect();
        let strategy = self
            .strategy
            .clone()
            .unwrap_or_else(|| defaults.sorting_strategy.clone());
        (expressions, strategy)
    }
}

impl fmt::Debug for SortingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortingState")
            .field("expressions", &self.expressions)
            .field("strategy", &self.strategy.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Sorts records with the library defaults.
pub fn sort(records: Vec<RecordRef>, state: &SortingState) -> Vec<RecordRef> {
    sort_with_defaults(records, state, &StateDefaults::default())
}

/// Sorts records, filling unset state from `defaults`.
pub fn sort_with_defaults(
    records: Vec<RecordRef>,
    state: &SortingState,
    defaults: &StateDefaults,
) -> Vec<RecordRef> {
    let (expressions, strategy) = state.resolve(defaults);
    if expressions.is_empty() {
        log::debug!("sort skipped: no active expressions");
        return records;
    }
    log::trace!(
        "sort: {} records by {} expressions",
        records.len(),
        expressions.len()
    );
    strategy.sort(records, &expressions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cmp::Ordering;
    use gridkit_core::{Record, Value};

    fn rec(id: u64, name: &str) -> RecordRef {
        Record::empty(id).with("name", name).into_ref()
    }

    fn ids(records: &[RecordRef]) -> Vec<u64> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_sort_applies_default_ignore_case() {
        let records = vec![rec(1, "b"), rec(2, "A"), rec(3, "a")];
        let state = SortingState::new(vec![SortingExpression::asc("name")]);
        // default folds case, so "A" and "a" tie and keep input order
        assert_eq!(ids(&sort(records, &state)), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_without_defaults_case() {
        let records = vec![rec(1, "b"), rec(2, "a"), rec(3, "A")];
        let state = SortingState::new(vec![SortingExpression::asc("name")]);
        let defaults = StateDefaults {
            sort_ignore_case: false,
            ..StateDefaults::default()
        };
        assert_eq!(ids(&sort_with_defaults(records, &state, &defaults)), vec![3, 2, 1]);
    }

    #[test]
    fn test_custom_strategy() {
        struct Reverse;
        impl SortingStrategy for Reverse {
            fn compare_values(&self, a: &Value, b: &Value, _: &SortingExpression) -> Ordering {
                b.cmp(a)
            }
        }

        let records = vec![rec(1, "a"), rec(2, "c"), rec(3, "b")];
        let state = SortingState::new(vec![SortingExpression::asc("name")])
            .with_strategy(Rc::new(Reverse));
        assert_eq!(ids(&sort(records, &state)), vec![2, 3, 1]);
    }

    #[test]
    fn test_with_expression_updates_in_place() {
        let state = SortingState::new(vec![
            SortingExpression::asc("a"),
            SortingExpression::asc("b"),
        ]);
        let next = state.with_expression(SortingExpression::desc("a"));
        assert_eq!(next.expressions.len(), 2);
        assert_eq!(next.expressions[0].field_name, "a");
        assert_eq!(next.expressions[0].dir, SortingDirection::Desc);
        // the original is untouched
        assert_eq!(state.expressions[0].dir, SortingDirection::Asc);
    }

    #[test]
    fn test_with_expression_none_removes() {
        let state = SortingState::new(vec![
            SortingExpression::asc("a"),
            SortingExpression::asc("b"),
        ]);
        let next = state.with_expression(SortingExpression::none("a"));
        assert_eq!(next.expressions.len(), 1);
        assert_eq!(next.find_index("b"), Some(0));

        let cleared = next.without_field("missing");
        assert_eq!(cleared.expressions.len(), 1);
    }

    #[test]
    fn test_with_expressions_appends() {
        let state = SortingState::default().with_expressions([
            SortingExpression::asc("a"),
            SortingExpression::desc("b"),
            SortingExpression::none("a"),
        ]);
        assert_eq!(state.expressions.len(), 1);
        assert_eq!(state.expressions[0].field_name, "b");
    }

    #[test]
    fn test_sort_empty_state_passes_through() {
        let records = vec![rec(2, "b"), rec(1, "a")];
        let sorted = sort(records, &SortingState::default());
        assert_eq!(ids(&sorted), vec![2, 1]);
    }
}
