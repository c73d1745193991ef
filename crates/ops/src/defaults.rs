//! Library defaults merged into partially specified states.
//!
//! Every state object leaves optional settings as `None`; the stage entry
//! points fill them from a `StateDefaults` table without touching values the
//! caller set.
//!
//! | setting                  | default                       |
//! |--------------------------|-------------------------------|
//! | `sorting_strategy`       | `StableSortingStrategy`       |
//! | `filtering_strategy`     | `Some(DefaultFilteringStrategy)` |
//! | `sort_ignore_case`       | `true`                        |
//! | `filter_ignore_case`     | `true`                        |
//! | `group_default_expanded` | `true`                        |
//! | `tree_expanded_levels`   | `0`                           |

use crate::filtering::{DefaultFilteringStrategy, FilteringStrategy};
use crate::sorting::{SortingStrategy, StableSortingStrategy};
use alloc::rc::Rc;
use core::fmt;

/// Default values for every optional state setting.
#[derive(Clone)]
pub struct StateDefaults {
    pub sorting_strategy: Rc<dyn SortingStrategy>,
    /// `None` disables filtering for states that carry no strategy.
    pub filtering_strategy: Option<Rc<dyn FilteringStrategy>>,
    pub sort_ignore_case: bool,
    pub filter_ignore_case: bool,
    pub group_default_expanded: bool,
    pub tree_expanded_levels: usize,
}

impl Default for StateDefaults {
    fn default() -> Self {
        Self {
            sorting_strategy: Rc::new(StableSortingStrategy),
            filtering_strategy: Some(Rc::new(DefaultFilteringStrategy)),
            sort_ignore_case: true,
            filter_ignore_case: true,
            group_default_expanded: true,
            tree_expanded_levels: 0,
        }
    }
}

impl fmt::Debug for StateDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefaults")
            .field("filtering_strategy", &self.filtering_strategy.is_some())
            .field("sort_ignore_case", &self.sort_ignore_case)
            .field("filter_ignore_case", &self.filter_ignore_case)
            .field("group_default_expanded", &self.group_default_expanded)
            .field("tree_expanded_levels", &self.tree_expanded_levels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::SortingExpression;

    #[test]
    fn test_defaults_fill_only_unset_options() {
        let defaults = StateDefaults::default();
        assert!(defaults.filtering_strategy.is_some());
        assert!(defaults.group_default_expanded);
        assert_eq!(defaults.tree_expanded_levels, 0);

        let unset = SortingExpression::asc("name").merged_with(defaults.sort_ignore_case);
        assert_eq!(unset.ignore_case, Some(true));
        let set = SortingExpression::asc("name")
            .with_ignore_case(false)
            .merged_with(defaults.sort_ignore_case);
        assert_eq!(set.ignore_case, Some(false));
    }
}
