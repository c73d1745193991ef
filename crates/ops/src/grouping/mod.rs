//! Grouping engine and group restoration.
//!
//! `group` turns a sorted record sequence into group headers interleaved
//! with member records. `restore_groups` then decides which of those rows
//! are visible from the caller's expansion table.

mod expansion;
mod group_by;
mod record;
mod restore;

pub use expansion::{
    is_hierarchy_match, is_hierarchy_match_by, is_key_match, GroupByExpandState, GroupByKey,
};
pub use group_by::group_by;
pub use record::{GroupArena, GroupId, GroupRecord, GroupedData, GroupedRow};
pub use restore::{restore, RestoredGroups};

use crate::defaults::StateDefaults;
use crate::sorting::{SortingExpression, SortingStrategy};
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use gridkit_core::{Error, RecordRef, Result};

/// Grouping configuration for one grid.
#[derive(Clone, Default)]
pub struct GroupingState {
    /// One expression per nesting level, outermost first.
    pub expressions: Vec<SortingExpression>,
    /// Caller-owned expansion table.
    pub expansion: Vec<GroupByExpandState>,
    /// Expansion of groups missing from `expansion`. `None` inherits the
    /// library default.
    pub default_expanded: Option<bool>,
    pub strategy: Option<Rc<dyn SortingStrategy>>,
}

impl GroupingState {
    pub fn new(expressions: Vec<SortingExpression>) -> Self {
        Self {
            expressions,
            ..Self::default()
        }
    }

    pub fn with_default_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = Some(expanded);
        self
    }

    pub fn with_strategy(mut self, strategy: Rc<dyn SortingStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Checks that every expression has a direction and no field is grouped
    /// twice.
    pub fn validate(&self) -> Result<()> {
        for (i, expression) in self.expressions.iter().enumerate() {
            if !expression.is_active() {
                return Err(Error::invalid_operation(format!(
                    "grouping expression for '{}' has no direction",
                    expression.field_name
                )));
            }
            if self.expressions[..i]
                .iter()
                .any(|e| e.field_name == expression.field_name)
            {
                return Err(Error::invalid_operation(format!(
                    "field '{}' is grouped more than once",
                    expression.field_name
                )));
            }
        }
        Ok(())
    }

    /// Returns whether the group at `hierarchy` is expanded.
    pub fn is_expanded(&self, hierarchy: &[GroupByKey], defaults: &StateDefaults) -> bool {
        self.find_expansion(hierarchy, defaults)
            .map_or(self.default_expanded(defaults), |i| self.expansion[i].expanded)
    }

    /// Returns a new state recording `expanded` for the group at `hierarchy`.
    pub fn with_expansion(&self, hierarchy: Vec<GroupByKey>, expanded: bool) -> Self {
        self.with_expansion_and_defaults(hierarchy, expanded, &StateDefaults::default())
    }

    /// Like `with_expansion`, matching existing entries under `defaults`.
    pub fn with_expansion_and_defaults(
        &self,
        hierarchy: Vec<GroupByKey>,
        expanded: bool,
        defaults: &StateDefaults,
    ) -> Self {
        let mut next = self.clone();
        match self.find_expansion(&hierarchy, defaults) {
            Some(i) => next.expansion[i].expanded = expanded,
            None => next
                .expansion
                .push(GroupByExpandState::new(hierarchy, expanded)),
        }
        next
    }

    /// Returns a new state with the group at `hierarchy` flipped.
    pub fn toggled(&self, hierarchy: Vec<GroupByKey>, defaults: &StateDefaults) -> Self {
        let expanded = self.is_expanded(&hierarchy, defaults);
        self.with_expansion_and_defaults(hierarchy, !expanded, defaults)
    }

    /// Index of the expansion entry for `hierarchy`, comparing values the
    /// way grouping does.
    fn find_expansion(&self, hierarchy: &[GroupByKey], defaults: &StateDefaults) -> Option<usize> {
        let expressions = self.resolved_expressions(defaults);
        let strategy = self.resolved_strategy(defaults);
        self.expansion.iter().position(|state| {
            is_hierarchy_match_by(&state.hierarchy, hierarchy, &expressions, &*strategy)
        })
    }

    fn default_expanded(&self, defaults: &StateDefaults) -> bool {
        self.default_expanded
            .unwrap_or(defaults.group_default_expanded)
    }

    fn resolved_strategy(&self, defaults: &StateDefaults) -> Rc<dyn SortingStrategy> {
        self.strategy
            .clone()
            .unwrap_or_else(|| defaults.sorting_strategy.clone())
    }

    /// Active expressions with defaults applied.
    pub(crate) fn resolved_expressions(&self, defaults: &StateDefaults) -> Vec<SortingExpression> {
        self.expressions
            .iter()
            .filter(|e| e.is_active())
            .map(|e| e.merged_with(defaults.sort_ignore_case))
            .collect()
    }
}

impl fmt::Debug for GroupingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupingState")
            .field("expressions", &self.expressions)
            .field("expansion", &self.expansion)
            .field("default_expanded", &self.default_expanded)
            .field("strategy", &self.strategy.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Groups pre-sorted records with the library defaults.
pub fn group(records: Vec<RecordRef>, state: &GroupingState) -> GroupedData {
    group_with_defaults(records, state, &StateDefaults::default())
}

/// Groups pre-sorted records, filling unset state from `defaults`.
pub fn group_with_defaults(
    records: Vec<RecordRef>,
    state: &GroupingState,
    defaults: &StateDefaults,
) -> GroupedData {
    let expressions = state.resolved_expressions(defaults);
    let strategy = state.resolved_strategy(defaults);
    group_by(records, &expressions, &*strategy)
}

/// Restores visible rows with the library defaults.
pub fn restore_groups(data: &GroupedData, state: &GroupingState) -> RestoredGroups {
    restore_groups_with_defaults(data, state, &StateDefaults::default())
}

/// Restores visible rows, filling unset state from `defaults`.
pub fn restore_groups_with_defaults(
    data: &GroupedData,
    state: &GroupingState,
    defaults: &StateDefaults,
) -> RestoredGroups {
    let depth = state.expressions.iter().filter(|e| e.is_active()).count();
    let strategy = state.resolved_strategy(defaults);
    restore(
        data,
        depth,
        &state.expansion,
        state.default_expanded(defaults),
        &*strategy,
    )
}
