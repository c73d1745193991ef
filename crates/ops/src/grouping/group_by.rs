//! Builds group headers over a sorted record sequence.

use super::record::{GroupArena, GroupId, GroupRecord, GroupedData, GroupedRow};
use crate::sorting::{SortingExpression, SortingStrategy};
use alloc::vec::Vec;
use core::cmp::Ordering;
use gridkit_core::RecordRef;

/// Groups `records` by `expressions`, one nesting level per expression.
///
/// The input must already be sorted by the same expressions: a new group
/// starts wherever the key value changes from the previous record within
/// the enclosing group. The returned rows interleave headers and members
/// depth-first in pre-order.
pub fn group_by(
    records: Vec<RecordRef>,
    expressions: &[SortingExpression],
    strategy: &dyn SortingStrategy,
) -> GroupedData {
    let mut grouper = Grouper {
        expressions,
        strategy,
        data: GroupedData::default(),
    };
    if expressions.is_empty() {
        grouper.push_members(&records, None);
    } else {
        grouper.group_level(&records, 0, None);
    }
    log::trace!(
        "group_by: {} records into {} groups over {} levels",
        records.len(),
        grouper.data.arena.len(),
        expressions.len()
    );
    grouper.data
}

struct Grouper<'a> {
    expressions: &'a [SortingExpression],
    strategy: &'a dyn SortingStrategy,
    data: GroupedData,
}

impl Grouper<'_> {
    fn group_level(&mut self, records: &[RecordRef], level: usize, parent: Option<GroupId>) {
        let (expressions, strategy) = (self.expressions, self.strategy);
        let expression = &expressions[level];
        let field = expression.field_name.as_str();

        let mut start = 0;
        while start < records.len() {
            let value = records[start].get_or_null(field);
            let end = start
                + 1
                + records[start + 1..]
                    .iter()
                    .take_while(|r| {
                        strategy.compare_values(value, r.get_or_null(field), expression)
                            == Ordering::Equal
                    })
                    .count();
            let members = &records[start..end];

            let id = self.data.arena.push(GroupRecord {
                expression: expression.clone(),
                value: value.clone(),
                level,
                records: members.to_vec(),
                parent,
            });
            self.data.rows.push(GroupedRow::Group(id));

            if level + 1 < expressions.len() {
                self.group_level(members, level + 1, Some(id));
            } else {
                self.push_members(members, Some(id));
            }
            start = end;
        }
    }

    fn push_members(&mut self, records: &[RecordRef], parent: Option<GroupId>) {
        self.data
            .rows
            .extend(records.iter().map(|record| GroupedRow::Record {
                record: record.clone(),
                parent,
            }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::StableSortingStrategy;
    use alloc::vec;
    use gridkit_core::{Record, Value};

    fn rec(id: u64, country: &str, city: &str) -> RecordRef {
        Record::empty(id)
            .with("country", country)
            .with("city", city)
            .into_ref()
    }

    #[test]
    fn test_single_level() {
        let records = vec![rec(1, "BE", "Gent"), rec(2, "NL", "Delft"), rec(3, "NL", "Utrecht")];
        let data = group_by(records, &[SortingExpression::asc("country")], &StableSortingStrategy);

        assert_eq!(data.arena.len(), 2);
        let headers: Vec<GroupId> = data.headers().collect();
        assert_eq!(headers, vec![0, 1]);
        assert_eq!(data.rows.len(), 5);
        assert_eq!(data.rows[0], GroupedRow::Group(0));
        assert_eq!(data.rows[2], GroupedRow::Group(1));

        let nl = data.arena.get(1).unwrap();
        assert_eq!(nl.value, Value::from("NL"));
        assert_eq!(nl.records.len(), 2);
        assert_eq!(nl.parent, None);
    }

    #[test]
    fn test_nested_levels() {
        let records = vec![
            rec(1, "BE", "Gent"),
            rec(2, "NL", "Delft"),
            rec(3, "NL", "Delft"),
            rec(4, "NL", "Utrecht"),
        ];
        let expressions = [SortingExpression::asc("country"), SortingExpression::asc("city")];
        let data = group_by(records, &expressions, &StableSortingStrategy);

        // BE, Gent, r1, NL, Delft, r2, r3, Utrecht, r4
        assert_eq!(data.rows.len(), 9);
        assert_eq!(data.arena.len(), 5);
        for (id, group) in data.arena.iter() {
            match group.level {
                0 => assert_eq!(group.parent, None),
                1 => {
                    let parent = group.parent.unwrap();
                    assert_eq!(data.arena.level(parent), Some(0));
                    assert!(id > parent);
                }
                _ => panic!("unexpected level"),
            }
        }
        let delft = data.arena.get(3).unwrap();
        assert_eq!(delft.value, Value::from("Delft"));
        assert_eq!(delft.records.len(), 2);
        assert_eq!(data.arena.hierarchy(3).len(), 2);
    }

    #[test]
    fn test_same_city_in_different_countries_splits() {
        let records = vec![rec(1, "A", "X"), rec(2, "B", "X")];
        let expressions = [SortingExpression::asc("country"), SortingExpression::asc("city")];
        let data = group_by(records, &expressions, &StableSortingStrategy);
        assert_eq!(data.arena.len(), 4);
    }

    #[test]
    fn test_ignore_case_merges_keys() {
        let records = vec![rec(1, "nl", "a"), rec(2, "NL", "b")];
        let folded = [SortingExpression::asc("country").with_ignore_case(true)];
        assert_eq!(group_by(records.clone(), &folded, &StableSortingStrategy).arena.len(), 1);

        let exact = [SortingExpression::asc("country").with_ignore_case(false)];
        assert_eq!(group_by(records, &exact, &StableSortingStrategy).arena.len(), 2);
    }

    #[test]
    fn test_no_expressions() {
        let records = vec![rec(1, "A", "X")];
        let data = group_by(records, &[], &StableSortingStrategy);
        assert!(data.arena.is_empty());
        assert_eq!(data.records().count(), 1);
    }
}
