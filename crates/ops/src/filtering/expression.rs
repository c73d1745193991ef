//! Filtering expressions and expression trees.

use super::condition::FilteringCondition;
use alloc::string::String;
use alloc::vec::Vec;
use gridkit_core::Value;

/// Boolean operator joining the operands of a tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilteringLogic {
    #[default]
    And,
    Or,
}

/// A predicate on one field.
#[derive(Clone, Debug)]
pub struct FilteringExpression {
    pub field_name: String,
    pub search_value: Value,
    pub condition: FilteringCondition,
    /// `None` inherits the library default.
    pub ignore_case: Option<bool>,
}

impl FilteringExpression {
    pub fn new(
        field_name: impl Into<String>,
        condition: impl Into<FilteringCondition>,
        search_value: impl Into<Value>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            search_value: search_value.into(),
            condition: condition.into(),
            ignore_case: None,
        }
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = Some(ignore_case);
        self
    }
}

/// One operand of a tree node: a leaf expression or a nested tree.
#[derive(Clone, Debug)]
pub enum FilteringOperand {
    Expression(FilteringExpression),
    Tree(FilteringExpressionsTree),
}

impl FilteringOperand {
    /// The field this operand belongs to, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            FilteringOperand::Expression(e) => Some(&e.field_name),
            FilteringOperand::Tree(t) => t.field_name.as_deref(),
        }
    }
}

impl From<FilteringExpression> for FilteringOperand {
    fn from(e: FilteringExpression) -> Self {
        FilteringOperand::Expression(e)
    }
}

impl From<FilteringExpressionsTree> for FilteringOperand {
    fn from(t: FilteringExpressionsTree) -> Self {
        FilteringOperand::Tree(t)
    }
}

/// A column taking part in a global filter.
///
/// A bare field name inherits the call's case setting; a `(name, true)` pair
/// always compares case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterColumn<'a> {
    pub field_name: &'a str,
    pub ignore_case: bool,
}

impl<'a> From<&'a str> for FilterColumn<'a> {
    fn from(field_name: &'a str) -> Self {
        Self {
            field_name,
            ignore_case: false,
        }
    }
}

impl<'a> From<(&'a str, bool)> for FilterColumn<'a> {
    fn from((field_name, ignore_case): (&'a str, bool)) -> Self {
        Self {
            field_name,
            ignore_case,
        }
    }
}

/// An AND/OR tree of filtering expressions.
///
/// Editing methods return a new tree and leave `self` untouched; operands
/// not named by the edit keep their structure and order.
#[derive(Clone, Debug, Default)]
pub struct FilteringExpressionsTree {
    pub operator: FilteringLogic,
    /// Set on per-column subtrees so they can be found and removed by field.
    pub field_name: Option<String>,
    pub operands: Vec<FilteringOperand>,
}

impl FilteringExpressionsTree {
    pub fn new(operator: FilteringLogic) -> Self {
        Self {
            operator,
            field_name: None,
            operands: Vec::new(),
        }
    }

    /// Creates a subtree owned by one column.
    pub fn for_field(operator: FilteringLogic, field_name: impl Into<String>) -> Self {
        Self {
            operator,
            field_name: Some(field_name.into()),
            operands: Vec::new(),
        }
    }

    /// Builder-style operand append.
    pub fn with_operand(mut self, operand: impl Into<FilteringOperand>) -> Self {
        self.operands.push(operand.into());
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// Index of the first operand belonging to `field_name`.
    pub fn find_index(&self, field_name: &str) -> Option<usize> {
        self.operands
            .iter()
            .position(|o| o.field_name() == Some(field_name))
    }

    /// The first operand belonging to `field_name`.
    pub fn find(&self, field_name: &str) -> Option<&FilteringOperand> {
        self.find_index(field_name).map(|i| &self.operands[i])
    }

    /// Returns a tree in which `field_name` is filtered by a single
    /// expression, replacing whatever operand the field had before.
    pub fn with_field_filter(
        &self,
        field_name: &str,
        search_value: impl Into<Value>,
        condition: impl Into<FilteringCondition>,
        ignore_case: bool,
    ) -> Self {
        let expression = FilteringExpression::new(field_name, condition, search_value)
            .with_ignore_case(ignore_case);
        let subtree =
            FilteringExpressionsTree::for_field(self.operator, field_name).with_operand(expression);
        self.with_field_tree(subtree)
    }

    /// Returns a tree with `subtree` as the operand for its field, replacing
    /// any existing one. A subtree without a field name is appended.
    pub fn with_field_tree(&self, subtree: FilteringExpressionsTree) -> Self {
        let mut next = match subtree.field_name.as_deref() {
            Some(field) => self.without_operand(field),
            None => self.clone(),
        };
        next.operands.push(FilteringOperand::Tree(subtree));
        next
    }

    /// Returns a tree without the operand for `field_name`. When the field
    /// has no operand, every operand is cleared.
    pub fn without_field(&self, field_name: &str) -> Self {
        match self.find_index(field_name) {
            Some(_) => self.without_operand(field_name),
            None => self.cleared(),
        }
    }

    /// Returns a tree with the same operator and no operands.
    pub fn cleared(&self) -> Self {
        Self {
            operator: self.operator,
            field_name: self.field_name.clone(),
            operands: Vec::new(),
        }
    }

    /// Returns an OR tree applying `condition` to every column in `columns`.
    /// A missing condition leaves the tree cleared.
    ///
    /// A column compares case-insensitively when either `ignore_case` or its
    /// own flag is set.
    pub fn with_global_filter<'a, I>(
        &self,
        columns: I,
        search_value: impl Into<Value>,
        condition: Option<FilteringCondition>,
        ignore_case: bool,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FilterColumn<'a>>,
    {
        let mut next = self.cleared();
        next.operator = FilteringLogic::Or;
        let Some(condition) = condition else {
            return next;
        };
        let search_value = search_value.into();
        for column in columns {
            let column = column.into();
            if next.find_index(column.field_name).is_none() {
                next = next.with_field_filter(
                    column.field_name,
                    search_value.clone(),
                    condition.clone(),
                    ignore_case || column.ignore_case,
                );
            }
        }
        next
    }

    /// Fills `ignore_case` on every leaf that left it unset.
    pub fn merged_with(&self, default_ignore_case: bool) -> Self {
        let operands = self
            .operands
            .iter()
            .map(|operand| match operand {
                FilteringOperand::Expression(e) => {
                    let mut e = e.clone();
                    e.ignore_case.get_or_insert(default_ignore_case);
                    FilteringOperand::Expression(e)
                }
                FilteringOperand::Tree(t) => {
                    FilteringOperand::Tree(t.merged_with(default_ignore_case))
                }
            })
            .collect();
        Self {
            operator: self.operator,
            field_name: self.field_name.clone(),
            operands,
        }
    }

    fn without_operand(&self, field_name: &str) -> Self {
        let mut next = self.clone();
        if let Some(index) = next.find_index(field_name) {
            next.operands.remove(index);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::{NumberCondition, StringCondition};

    fn sample_tree() -> FilteringExpressionsTree {
        FilteringExpressionsTree::new(FilteringLogic::And)
            .with_field_filter("name", "a", StringCondition::Contains, true)
            .with_field_filter("age", 30i64, NumberCondition::GreaterThan, true)
            .with_field_filter("city", "x", StringCondition::Equals, false)
    }

    #[test]
    fn test_find_index() {
        let tree = sample_tree();
        assert_eq!(tree.find_index("name"), Some(0));
        assert_eq!(tree.find_index("city"), Some(2));
        assert_eq!(tree.find_index("missing"), None);
        assert!(tree.find("age").is_some());
    }

    #[test]
    fn test_field_filter_replaces_existing() {
        let tree = sample_tree().with_field_filter("name", "b", StringCondition::StartsWith, true);
        assert_eq!(tree.operands.len(), 3);
        // replaced operand moves to the end, the rest keep their order
        assert_eq!(tree.find_index("age"), Some(0));
        assert_eq!(tree.find_index("city"), Some(1));
        assert_eq!(tree.find_index("name"), Some(2));
    }

    #[test]
    fn test_without_field_keeps_rest() {
        let original = sample_tree();
        let tree = original.without_field("age");
        assert_eq!(tree.operands.len(), 2);
        assert_eq!(tree.find_index("name"), Some(0));
        assert_eq!(tree.find_index("city"), Some(1));
        // input untouched
        assert_eq!(original.operands.len(), 3);
    }

    #[test]
    fn test_without_unknown_field_clears() {
        let tree = sample_tree().without_field("unknown");
        assert!(tree.is_empty());
        assert_eq!(tree.operator, FilteringLogic::And);
    }

    #[test]
    fn test_global_filter() {
        let tree = sample_tree().with_global_filter(
            ["name", "city"],
            "x",
            Some(StringCondition::Contains.into()),
            true,
        );
        assert_eq!(tree.operator, FilteringLogic::Or);
        assert_eq!(tree.operands.len(), 2);
        assert!(tree.find("age").is_none());

        let cleared = sample_tree().with_global_filter(["name"], "x", None, true);
        assert!(cleared.is_empty());
    }

    fn leaf_ignore_case(tree: &FilteringExpressionsTree, field: &str) -> Option<bool> {
        match tree.find(field) {
            Some(FilteringOperand::Tree(t)) => match &t.operands[0] {
                FilteringOperand::Expression(e) => e.ignore_case,
                FilteringOperand::Tree(_) => None,
            },
            _ => None,
        }
    }

    #[test]
    fn test_global_filter_column_ignore_case() {
        let tree = FilteringExpressionsTree::default().with_global_filter(
            [("name", true), ("city", false)],
            "x",
            Some(StringCondition::Contains.into()),
            false,
        );
        assert_eq!(leaf_ignore_case(&tree, "name"), Some(true));
        assert_eq!(leaf_ignore_case(&tree, "city"), Some(false));

        // the call-wide flag still applies to every column
        let tree = FilteringExpressionsTree::default().with_global_filter(
            [("name", false), ("city", false)],
            "x",
            Some(StringCondition::Contains.into()),
            true,
        );
        assert_eq!(leaf_ignore_case(&tree, "name"), Some(true));
        assert_eq!(leaf_ignore_case(&tree, "city"), Some(true));
    }

    #[test]
    fn test_merged_with_fills_nested_leaves() {
        let tree = FilteringExpressionsTree::new(FilteringLogic::Or)
            .with_operand(FilteringExpression::new("a", StringCondition::Equals, "x"))
            .with_operand(
                FilteringExpressionsTree::new(FilteringLogic::And).with_operand(
                    FilteringExpression::new("b", StringCondition::Equals, "y")
                        .with_ignore_case(false),
                ),
            );
        let merged = tree.merged_with(true);
        match (&merged.operands[0], &merged.operands[1]) {
            (FilteringOperand::Expression(a), FilteringOperand::Tree(t)) => {
                assert_eq!(a.ignore_case, Some(true));
                match &t.operands[0] {
                    FilteringOperand::Expression(b) => assert_eq!(b.ignore_case, Some(false)),
                    other => panic!("unexpected operand {:?}", other),
                }
            }
            other => panic!("unexpected operands {:?}", other),
        }
    }
}
