//! Pluggable filtering strategies.

use super::expression::{
    FilteringExpression, FilteringExpressionsTree, FilteringLogic, FilteringOperand,
};
use alloc::vec::Vec;
use gridkit_core::{Record, RecordRef};

/// Evaluates expression trees against records.
pub trait FilteringStrategy {
    /// Evaluates one leaf expression.
    fn find_match(&self, record: &Record, expression: &FilteringExpression) -> bool {
        let value = record.get_or_null(&expression.field_name);
        expression.condition.evaluate(
            value,
            &expression.search_value,
            expression.ignore_case.unwrap_or(true),
        )
    }

    /// Evaluates a tree node, short-circuiting per operator. An empty node
    /// matches everything.
    fn matches_record(&self, record: &Record, tree: &FilteringExpressionsTree) -> bool {
        let eval = |operand: &FilteringOperand| match operand {
            FilteringOperand::Expression(e) => self.find_match(record, e),
            FilteringOperand::Tree(t) => self.matches_record(record, t),
        };
        match tree.operator {
            FilteringLogic::And => tree.operands.iter().all(eval),
            FilteringLogic::Or => tree.is_empty() || tree.operands.iter().any(eval),
        }
    }

    /// Keeps the records matching `tree`, preserving order.
    fn filter(&self, records: Vec<RecordRef>, tree: &FilteringExpressionsTree) -> Vec<RecordRef> {
        if tree.is_empty() || records.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| self.matches_record(record, tree))
            .collect()
    }
}

/// The default tree evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFilteringStrategy;

impl FilteringStrategy for DefaultFilteringStrategy {}
