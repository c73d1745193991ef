//! Sorting expressions.

use alloc::rc::Rc;
use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use gridkit_core::Value;

/// Sort direction for one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortingDirection {
    /// The field takes no part in ordering.
    #[default]
    None,
    /// Ascending order (smallest first)
    Asc,
    /// Descending order (largest first)
    Desc,
}

impl SortingDirection {
    /// Applies this direction to a comparison result.
    #[inline]
    pub fn apply(&self, ord: Ordering) -> Ordering {
        match self {
            SortingDirection::Desc => ord.reverse(),
            _ => ord,
        }
    }
}

/// Custom value comparison used in place of the natural value order.
pub type Comparer = Rc<dyn Fn(&Value, &Value) -> Ordering>;

/// Sorts by one field.
#[derive(Clone)]
pub struct SortingExpression {
    pub field_name: String,
    pub dir: SortingDirection,
    /// Fold string case while comparing. `None` inherits the library default.
    pub ignore_case: Option<bool>,
    pub comparer: Option<Comparer>,
}

impl SortingExpression {
    pub fn new(field_name: impl Into<String>, dir: SortingDirection) -> Self {
        Self {
            field_name: field_name.into(),
            dir,
            ignore_case: None,
            comparer: None,
        }
    }

    pub fn asc(field_name: impl Into<String>) -> Self {
        Self::new(field_name, SortingDirection::Asc)
    }

    pub fn desc(field_name: impl Into<String>) -> Self {
        Self::new(field_name, SortingDirection::Desc)
    }

    /// An expression that clears any sort on `field_name`.
    pub fn none(field_name: impl Into<String>) -> Self {
        Self::new(field_name, SortingDirection::None)
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = Some(ignore_case);
        self
    }

    pub fn with_comparer<F>(mut self, comparer: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + 'static,
    {
        self.comparer = Some(Rc::new(comparer));
        self
    }

    /// Returns true if the expression takes part in ordering.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.dir != SortingDirection::None
    }

    /// Fills `ignore_case` from the default when unset.
    pub fn merged_with(&self, default_ignore_case: bool) -> Self {
        let mut merged = self.clone();
        if merged.ignore_case.is_none() {
            merged.ignore_case = Some(default_ignore_case);
        }
        merged
    }

    /// Compares two field values without applying the direction.
    pub fn compare_values(&self, a: &Value, b: &Value) -> Ordering {
        match &self.comparer {
            Some(comparer) => comparer(a, b),
            None => a.cmp_with_case(b, self.ignore_case.unwrap_or(true)),
        }
    }
}

impl fmt::Debug for SortingExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortingExpression")
            .field("field_name", &self.field_name)
            .field("dir", &self.dir)
            .field("ignore_case", &self.ignore_case)
            .field("comparer", &self.comparer.as_ref().map(|_| "custom"))
            .finish()
    }
}

impl PartialEq for SortingExpression {
    fn eq(&self, other: &Self) -> bool {
        self.field_name == other.field_name
            && self.dir == other.dir
            && self.ignore_case == other.ignore_case
            && match (&self.comparer, &other.comparer) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
    }
}
