//! Filtering conditions.
//!
//! A condition is a predicate `(record value, search value, ignore case)`.
//! Built-in conditions are grouped by the column data type they apply to.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use gridkit_core::{DataType, Value};

/// Conditions for string columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringCondition {
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    Equals,
    DoesNotEqual,
    Empty,
    NotEmpty,
    Null,
    NotNull,
}

/// Conditions for number columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberCondition {
    Equals,
    DoesNotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
    Empty,
    NotEmpty,
    Null,
    NotNull,
}

/// Conditions for boolean columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BooleanCondition {
    All,
    True,
    False,
    Empty,
    NotEmpty,
    Null,
    NotNull,
}

/// Conditions for date columns. `Equals`/`DoesNotEqual` compare calendar
/// days; `Before`/`After` compare full timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateCondition {
    Equals,
    DoesNotEqual,
    Before,
    After,
    Empty,
    NotEmpty,
    Null,
    NotNull,
}

/// Signature of a custom condition.
pub type ConditionFn = dyn Fn(&Value, &Value, bool) -> bool;

/// A named, caller-supplied condition.
#[derive(Clone)]
pub struct CustomCondition {
    pub name: String,
    logic: Rc<ConditionFn>,
}

impl CustomCondition {
    pub fn new<F>(name: impl Into<String>, logic: F) -> Self
    where
        F: Fn(&Value, &Value, bool) -> bool + 'static,
    {
        Self {
            name: name.into(),
            logic: Rc::new(logic),
        }
    }
}

impl fmt::Debug for CustomCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomCondition({})", self.name)
    }
}

/// Any filtering condition.
#[derive(Clone, Debug)]
pub enum FilteringCondition {
    String(StringCondition),
    Number(NumberCondition),
    Boolean(BooleanCondition),
    Date(DateCondition),
    Custom(CustomCondition),
}

impl FilteringCondition {
    /// Returns the condition name as the grid UI knows it.
    pub fn name(&self) -> &str {
        match self {
            FilteringCondition::String(c) => match c {
                StringCondition::Contains => "contains",
                StringCondition::DoesNotContain => "doesNotContain",
                StringCondition::StartsWith => "startsWith",
                StringCondition::EndsWith => "endsWith",
                StringCondition::Equals => "equals",
                StringCondition::DoesNotEqual => "doesNotEqual",
                StringCondition::Empty => "empty",
                StringCondition::NotEmpty => "notEmpty",
                StringCondition::Null => "null",
                StringCondition::NotNull => "notNull",
            },
            FilteringCondition::Number(c) => match c {
                NumberCondition::Equals => "equals",
                NumberCondition::DoesNotEqual => "doesNotEqual",
                NumberCondition::GreaterThan => "greaterThan",
                NumberCondition::LessThan => "lessThan",
                NumberCondition::GreaterThanOrEqualTo => "greaterThanOrEqualTo",
                NumberCondition::LessThanOrEqualTo => "lessThanOrEqualTo",
                NumberCondition::Empty => "empty",
                NumberCondition::NotEmpty => "notEmpty",
                NumberCondition::Null => "null",
                NumberCondition::NotNull => "notNull",
            },
            FilteringCondition::Boolean(c) => match c {
                BooleanCondition::All => "all",
                BooleanCondition::True => "true",
                BooleanCondition::False => "false",
                BooleanCondition::Empty => "empty",
                BooleanCondition::NotEmpty => "notEmpty",
                BooleanCondition::Null => "null",
                BooleanCondition::NotNull => "notNull",
            },
            FilteringCondition::Date(c) => match c {
                DateCondition::Equals => "equals",
                DateCondition::DoesNotEqual => "doesNotEqual",
                DateCondition::Before => "before",
                DateCondition::After => "after",
                DateCondition::Empty => "empty",
                DateCondition::NotEmpty => "notEmpty",
                DateCondition::Null => "null",
                DateCondition::NotNull => "notNull",
            },
            FilteringCondition::Custom(c) => &c.name,
        }
    }

    /// Returns every built-in condition for a column data type.
    pub fn conditions_for(data_type: DataType) -> Vec<FilteringCondition> {
        use FilteringCondition as F;
        match data_type {
            DataType::String => [
                StringCondition::Contains,
                StringCondition::DoesNotContain,
                StringCondition::StartsWith,
                StringCondition::EndsWith,
                StringCondition::Equals,
                StringCondition::DoesNotEqual,
                StringCondition::Empty,
                StringCondition::NotEmpty,
                StringCondition::Null,
                StringCondition::NotNull,
            ]
            .into_iter()
            .map(F::String)
            .collect(),
            DataType::Number => [
                NumberCondition::Equals,
                NumberCondition::DoesNotEqual,
                NumberCondition::GreaterThan,
                NumberCondition::LessThan,
                NumberCondition::GreaterThanOrEqualTo,
                NumberCondition::LessThanOrEqualTo,
                NumberCondition::Empty,
                NumberCondition::NotEmpty,
                NumberCondition::Null,
                NumberCondition::NotNull,
            ]
            .into_iter()
            .map(F::Number)
            .collect(),
            DataType::Boolean => [
                BooleanCondition::All,
                BooleanCondition::True,
                BooleanCondition::False,
                BooleanCondition::Empty,
                BooleanCondition::NotEmpty,
                BooleanCondition::Null,
                BooleanCondition::NotNull,
            ]
            .into_iter()
            .map(F::Boolean)
            .collect(),
            DataType::Date => [
                DateCondition::Equals,
                DateCondition::DoesNotEqual,
                DateCondition::Before,
                DateCondition::After,
                DateCondition::Empty,
                DateCondition::NotEmpty,
                DateCondition::Null,
                DateCondition::NotNull,
            ]
            .into_iter()
            .map(F::Date)
            .collect(),
        }
    }

    /// Looks up a built-in condition by data type and name.
    pub fn by_name(data_type: DataType, name: &str) -> Option<FilteringCondition> {
        Self::conditions_for(data_type)
            .into_iter()
            .find(|c| c.name() == name)
    }

    /// Evaluates the condition for one record value.
    pub fn evaluate(&self, value: &Value, search: &Value, ignore_case: bool) -> bool {
        match self {
            FilteringCondition::String(c) => eval_string(*c, value, search, ignore_case),
            FilteringCondition::Number(c) => eval_number(*c, value, search),
            FilteringCondition::Boolean(c) => eval_boolean(*c, value),
            FilteringCondition::Date(c) => eval_date(*c, value, search),
            FilteringCondition::Custom(c) => (c.logic)(value, search, ignore_case),
        }
    }
}

impl From<StringCondition> for FilteringCondition {
    fn from(c: StringCondition) -> Self {
        FilteringCondition::String(c)
    }
}

impl From<NumberCondition> for FilteringCondition {
    fn from(c: NumberCondition) -> Self {
        FilteringCondition::Number(c)
    }
}

impl From<BooleanCondition> for FilteringCondition {
    fn from(c: BooleanCondition) -> Self {
        FilteringCondition::Boolean(c)
    }
}

impl From<DateCondition> for FilteringCondition {
    fn from(c: DateCondition) -> Self {
        FilteringCondition::Date(c)
    }
}

impl From<CustomCondition> for FilteringCondition {
    fn from(c: CustomCondition) -> Self {
        FilteringCondition::Custom(c)
    }
}

/// Text of a scalar value for string matching; None for Null.
fn text_of(value: &Value, ignore_case: bool) -> Option<Cow<'_, str>> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_text()),
    };
    if ignore_case {
        Some(Cow::Owned(text.to_lowercase()))
    } else {
        Some(text)
    }
}

fn eval_string(
    condition: StringCondition,
    value: &Value,
    search: &Value,
    ignore_case: bool,
) -> bool {
    use StringCondition as C;
    match condition {
        C::Empty => value.is_empty(),
        C::NotEmpty => !value.is_empty(),
        C::Null => value.is_null(),
        C::NotNull => !value.is_null(),
        C::Contains | C::StartsWith | C::EndsWith | C::Equals => {
            let (Some(target), Some(search)) =
                (text_of(value, ignore_case), text_of(search, ignore_case))
            else {
                return false;
            };
            match condition {
                C::Contains => target.contains(&*search),
                C::StartsWith => target.starts_with(&*search),
                C::EndsWith => target.ends_with(&*search),
                _ => target == search,
            }
        }
        C::DoesNotContain => !eval_string(C::Contains, value, search, ignore_case),
        C::DoesNotEqual => !eval_string(C::Equals, value, search, ignore_case),
    }
}

fn eval_number(condition: NumberCondition, value: &Value, search: &Value) -> bool {
    use NumberCondition as C;
    let is_empty = match value {
        Value::Float64(f) => f.is_nan(),
        other => other.is_null(),
    };
    match condition {
        C::Empty => return is_empty,
        C::NotEmpty => return !is_empty,
        C::Null => return value.is_null(),
        C::NotNull => return !value.is_null(),
        _ => {}
    }
    let ordering = match (value.as_number(), search.as_number()) {
        (Some(_), Some(_)) => Some(value.cmp(search)),
        _ => None,
    };
    match condition {
        C::Equals => ordering == Some(Ordering::Equal),
        C::DoesNotEqual => ordering != Some(Ordering::Equal),
        C::GreaterThan => ordering == Some(Ordering::Greater),
        C::LessThan => ordering == Some(Ordering::Less),
        C::GreaterThanOrEqualTo => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        C::LessThanOrEqualTo => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        C::Empty | C::NotEmpty | C::Null | C::NotNull => false,
    }
}

fn eval_boolean(condition: BooleanCondition, value: &Value) -> bool {
    use BooleanCondition as C;
    match condition {
        C::All => true,
        C::True => value.as_bool() == Some(true),
        C::False => value.as_bool() == Some(false),
        C::Empty | C::Null => value.is_null(),
        C::NotEmpty | C::NotNull => !value.is_null(),
    }
}

fn eval_date(condition: DateCondition, value: &Value, search: &Value) -> bool {
    use DateCondition as C;
    match condition {
        C::Empty | C::Null => value.is_null(),
        C::NotEmpty | C::NotNull => !value.is_null(),
        C::Equals => matches!((value.as_day(), search.as_day()), (Some(a), Some(b)) if a == b),
        C::DoesNotEqual => !eval_date(C::Equals, value, search),
        C::Before => matches!(
            (value.as_datetime(), search.as_datetime()),
            (Some(a), Some(b)) if a < b
        ),
        C::After => matches!(
            (value.as_datetime(), search.as_datetime()),
            (Some(a), Some(b)) if a > b
        ),
    }
}
