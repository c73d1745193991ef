//! Filtering engine.
//!
//! Records are kept when the filtering expressions tree evaluates to true for
//! them. The tree is evaluated by a pluggable `FilteringStrategy`; a state
//! with no strategy (and no default strategy) leaves the input unchanged.

mod condition;
mod expression;
mod strategy;

pub use condition::{
    BooleanCondition, ConditionFn, CustomCondition, DateCondition, FilteringCondition,
    NumberCondition, StringCondition,
};
pub use expression::{
    FilterColumn, FilteringExpression, FilteringExpressionsTree, FilteringLogic, FilteringOperand,
};
pub use strategy::{DefaultFilteringStrategy, FilteringStrategy};

use crate::defaults::StateDefaults;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use gridkit_core::{RecordRef, Value};

/// Filtering configuration for one grid.
#[derive(Clone, Default)]
pub struct FilteringState {
    pub expressions_tree: FilteringExpressionsTree,
    pub strategy: Option<Rc<dyn FilteringStrategy>>,
}

impl FilteringState {
    pub fn new(expressions_tree: FilteringExpressionsTree) -> Self {
        Self {
            expressions_tree,
            strategy: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Rc<dyn FilteringStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

impl fmt::Debug for FilteringState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteringState")
            .field("expressions_tree", &self.expressions_tree)
            .field("strategy", &self.strategy.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Filters records with the library defaults.
pub fn filter(records: Vec<RecordRef>, state: &FilteringState) -> Vec<RecordRef> {
    filter_with_defaults(records, state, &StateDefaults::default())
}

/// Filters records, filling unset state from `defaults`.
pub fn filter_with_defaults(
    records: Vec<RecordRef>,
    state: &FilteringState,
    defaults: &StateDefaults,
) -> Vec<RecordRef> {
    let Some(strategy) = state
        .strategy
        .clone()
        .or_else(|| defaults.filtering_strategy.clone())
    else {
        log::debug!("filter skipped: no filtering strategy");
        return records;
    };
    let tree = state.expressions_tree.merged_with(defaults.filter_ignore_case);
    let before = records.len();
    let filtered = strategy.filter(records, &tree);
    log::trace!("filter: {} -> {} records", before, filtered.len());
    filtered
}

/// Filters records by one field with the default strategy.
pub fn filter_field(
    records: Vec<RecordRef>,
    field_name: &str,
    search_value: impl Into<Value>,
    condition: impl Into<FilteringCondition>,
    ignore_case: bool,
) -> Vec<RecordRef> {
    let tree = FilteringExpressionsTree::default().with_field_filter(
        field_name,
        search_value,
        condition,
        ignore_case,
    );
    filter(records, &FilteringState::new(tree))
}
