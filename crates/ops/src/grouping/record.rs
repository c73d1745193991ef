//! Group records and the arena that owns them.
//!
//! Group headers reference their parent by index into a `GroupArena` rather
//! than by pointer, so a grouped sequence is plain owned data.

use super::expansion::{is_key_match, GroupByKey};
use crate::sorting::{SortingExpression, SortingStrategy};
use alloc::vec::Vec;
use gridkit_core::{RecordRef, Value};

/// Index of a group record in its arena.
pub type GroupId = usize;

/// A synthetic group header.
#[derive(Clone, Debug)]
pub struct GroupRecord {
    /// The grouping expression this level was built from.
    pub expression: SortingExpression,
    /// Key value shared by every member.
    pub value: Value,
    /// Zero-based nesting depth.
    pub level: usize,
    /// Member data records, in sorted order.
    pub records: Vec<RecordRef>,
    /// Enclosing group at `level - 1`; None at the root.
    pub parent: Option<GroupId>,
}

impl GroupRecord {
    /// The `{field, value}` key of this group alone.
    pub fn key(&self) -> GroupByKey {
        GroupByKey::new(self.expression.field_name.clone(), self.value.clone())
    }
}

/// Flat storage for group records.
#[derive(Clone, Debug, Default)]
pub struct GroupArena {
    groups: Vec<GroupRecord>,
}

impl GroupArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, group: GroupRecord) -> GroupId {
        self.groups.push(group);
        self.groups.len() - 1
    }

    pub fn get(&self, id: GroupId) -> Option<&GroupRecord> {
        self.groups.get(id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &GroupRecord)> {
        self.groups.iter().enumerate()
    }

    pub fn parent(&self, id: GroupId) -> Option<GroupId> {
        self.get(id).and_then(|g| g.parent)
    }

    pub fn level(&self, id: GroupId) -> Option<usize> {
        self.get(id).map(|g| g.level)
    }

    /// Root-to-leaf `{field, value}` keys identifying a group.
    pub fn hierarchy(&self, id: GroupId) -> Vec<GroupByKey> {
        let mut keys = Vec::new();
        let mut current = self.get(id);
        while let Some(group) = current {
            keys.push(group.key());
            current = group.parent.and_then(|parent| self.get(parent));
        }
        keys.reverse();
        keys
    }

    /// Returns true if `hierarchy` identifies the group `id`, comparing each
    /// level's value with that level's grouping expression.
    pub fn matches_hierarchy(
        &self,
        id: GroupId,
        hierarchy: &[GroupByKey],
        strategy: &dyn SortingStrategy,
    ) -> bool {
        let mut current = self.get(id);
        let mut keys = hierarchy.iter().rev();
        loop {
            match (current, keys.next()) {
                (Some(group), Some(key)) => {
                    if !is_key_match(key, &group.value, &group.expression, strategy) {
                        return false;
                    }
                    current = group.parent.and_then(|parent| self.get(parent));
                }
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

/// One row of a grouped display sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupedRow {
    /// A group header.
    Group(GroupId),
    /// A data record and the innermost group containing it.
    Record {
        record: RecordRef,
        parent: Option<GroupId>,
    },
}

impl GroupedRow {
    /// The group directly enclosing this row.
    pub fn parent_in(&self, arena: &GroupArena) -> Option<GroupId> {
        match self {
            GroupedRow::Group(id) => arena.parent(*id),
            GroupedRow::Record { parent, .. } => *parent,
        }
    }

    pub fn as_record(&self) -> Option<&RecordRef> {
        match self {
            GroupedRow::Record { record, .. } => Some(record),
            GroupedRow::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<GroupId> {
        match self {
            GroupedRow::Group(id) => Some(*id),
            GroupedRow::Record { .. } => None,
        }
    }
}

/// Output of grouping: the arena plus the fully expanded pre-order sequence
/// of headers and member records.
#[derive(Clone, Debug, Default)]
pub struct GroupedData {
    pub arena: GroupArena,
    pub rows: Vec<GroupedRow>,
}

impl GroupedData {
    /// Data records in display order.
    pub fn records(&self) -> impl Iterator<Item = &RecordRef> {
        self.rows.iter().filter_map(GroupedRow::as_record)
    }

    /// Group headers in display order.
    pub fn headers(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.rows.iter().filter_map(GroupedRow::as_group)
    }
}
