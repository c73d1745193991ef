//! Tree hierarchizer and flattener.
//!
//! `hierarchize` wraps records carrying their children under a named
//! `Value::Records` field into nested nodes. `flatten` walks those nodes
//! depth-first and emits display rows, descending only into expanded nodes.

use alloc::vec::Vec;
use gridkit_core::{RecordId, RecordRef};
use hashbrown::HashMap;

use crate::defaults::StateDefaults;

/// A record with its nested children.
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchicalRecord {
    pub data: RecordRef,
    /// `None` when the record has no children.
    pub children: Option<Vec<HierarchicalRecord>>,
}

impl HierarchicalRecord {
    pub fn has_children(&self) -> bool {
        self.children.as_ref().map_or(false, |c| !c.is_empty())
    }
}

/// Builds the nested tree for `records`, reading children from `child_key`.
///
/// An absent, non-record or empty children field yields `children: None`.
pub fn hierarchize(records: &[RecordRef], child_key: &str) -> Vec<HierarchicalRecord> {
    records
        .iter()
        .map(|record| hierarchize_record(record, child_key))
        .collect()
}

fn hierarchize_record(record: &RecordRef, child_key: &str) -> HierarchicalRecord {
    let children = record
        .get(child_key)
        .and_then(|value| value.as_records())
        .filter(|children| !children.is_empty())
        .map(|children| {
            children
                .iter()
                .map(|child| hierarchize_record(child, child_key))
                .collect()
        });
    HierarchicalRecord {
        data: record.clone(),
        children,
    }
}

/// One display row of a flattened tree.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatRecord {
    pub data: RecordRef,
    pub has_children: bool,
    /// Depth below the root, starting at 0.
    pub indentation_level: usize,
}

/// Decides whether a flattened row shows its children.
pub trait ExpansionLookup {
    fn is_expanded(&self, record: &FlatRecord) -> bool;
}

impl<F> ExpansionLookup for F
where
    F: Fn(&FlatRecord) -> bool,
{
    fn is_expanded(&self, record: &FlatRecord) -> bool {
        self(record)
    }
}

/// Per-row expansion table for a tree grid.
///
/// An explicit entry for a record id wins. Otherwise a row is expanded when
/// its indentation level is below `expanded_levels`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeExpansionState {
    pub states: HashMap<RecordId, bool>,
    pub expanded_levels: usize,
}

impl TreeExpansionState {
    pub fn new(expanded_levels: usize) -> Self {
        Self {
            states: HashMap::new(),
            expanded_levels,
        }
    }

    /// Creates an empty table using the default expansion depth.
    pub fn from_defaults(defaults: &StateDefaults) -> Self {
        Self::new(defaults.tree_expanded_levels)
    }

    /// Returns a new table with `id` set to `expanded`.
    pub fn with_state(&self, id: RecordId, expanded: bool) -> Self {
        let mut next = self.clone();
        next.states.insert(id, expanded);
        next
    }

    /// Returns a new table with the row flipped from `current`.
    pub fn toggled(&self, id: RecordId, current: bool) -> Self {
        self.with_state(id, !current)
    }
}

impl ExpansionLookup for TreeExpansionState {
    fn is_expanded(&self, record: &FlatRecord) -> bool {
        self.states
            .get(&record.data.id())
            .copied()
            .unwrap_or(record.indentation_level < self.expanded_levels)
    }
}

/// Flattens `tree` in pre-order, skipping the children of collapsed nodes.
pub fn flatten<L>(tree: &[HierarchicalRecord], expansion: &L) -> Vec<FlatRecord>
where
    L: ExpansionLookup + ?Sized,
{
    let mut rows = Vec::new();
    flatten_level(tree, 0, expansion, &mut rows);
    log::trace!("flatten: {} roots into {} rows", tree.len(), rows.len());
    rows
}

fn flatten_level<L>(
    nodes: &[HierarchicalRecord],
    level: usize,
    expansion: &L,
    rows: &mut Vec<FlatRecord>,
) where
    L: ExpansionLookup + ?Sized,
{
    for node in nodes {
        let row = FlatRecord {
            data: node.data.clone(),
            has_children: node.has_children(),
            indentation_level: level,
        };
        let expanded = row.has_children && expansion.is_expanded(&row);
        rows.push(row);
        if expanded {
            if let Some(children) = &node.children {
                flatten_level(children, level + 1, expansion, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use gridkit_core::{Record, Value};

    // root(1) -> child(2) -> grandchild(3), root(1) -> child(4)
    fn tree() -> Vec<RecordRef> {
        let grandchild = Record::empty(3).with("name", "grandchild");
        let child = Record::empty(2)
            .with("name", "child")
            .with("children", vec![grandchild]);
        let leaf = Record::empty(4).with("name", "leaf");
        let root = Record::empty(1)
            .with("name", "root")
            .with("children", vec![child, leaf]);
        vec![root.into_ref()]
    }

    fn ids(rows: &[FlatRecord]) -> Vec<(RecordId, usize)> {
        rows.iter().map(|r| (r.data.id(), r.indentation_level)).collect()
    }

    #[test]
    fn test_hierarchize() {
        let nested = hierarchize(&tree(), "children");
        assert_eq!(nested.len(), 1);
        let children = nested[0].children.as_ref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].data.id(), 2);
        assert!(children[0].has_children());
        assert!(children[1].children.is_none());
    }

    #[test]
    fn test_empty_children_field_is_none() {
        let records = vec![Record::empty(1)
            .with("children", Value::Records(vec![]))
            .into_ref()];
        let nested = hierarchize(&records, "children");
        assert!(nested[0].children.is_none());

        let nested = hierarchize(&records, "missing");
        assert!(nested[0].children.is_none());
    }

    #[test]
    fn test_flatten_only_root_expanded() {
        let nested = hierarchize(&tree(), "children");
        let state = TreeExpansionState::new(0).with_state(1, true);
        let rows = flatten(&nested, &state);
        assert_eq!(ids(&rows), vec![(1, 0), (2, 1), (4, 1)]);
        assert!(rows[0].has_children);
        assert!(rows[1].has_children);
        assert!(!rows[2].has_children);
    }

    #[test]
    fn test_flatten_all_collapsed() {
        let nested = hierarchize(&tree(), "children");
        let rows = flatten(&nested, &TreeExpansionState::default());
        assert_eq!(ids(&rows), vec![(1, 0)]);
    }

    #[test]
    fn test_expanded_levels() {
        let nested = hierarchize(&tree(), "children");
        let rows = flatten(&nested, &TreeExpansionState::new(2));
        assert_eq!(ids(&rows), vec![(1, 0), (2, 1), (3, 2), (4, 1)]);

        // explicit entry beats the level rule
        let state = TreeExpansionState::new(2).with_state(2, false);
        let rows = flatten(&nested, &state);
        assert_eq!(ids(&rows), vec![(1, 0), (2, 1), (4, 1)]);
    }

    #[test]
    fn test_closure_lookup() {
        let nested = hierarchize(&tree(), "children");
        let rows = flatten(&nested, &|_: &FlatRecord| true);
        assert_eq!(rows.len(), 4);
        let rows = flatten(&nested, &|row: &FlatRecord| row.data.id() != 1);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_hierarchize_shares_children() {
        // a chain 0 -> 1 -> ... -> 50
        let mut node = Record::empty(50).into_ref();
        for id in (0..50).rev() {
            node = Record::empty(id).with("children", vec![node]).into_ref();
        }
        let root = node;
        let nested = hierarchize(&[root.clone()], "children");

        let mut expected = &root;
        let mut current = &nested[0];
        loop {
            assert!(Rc::ptr_eq(&current.data, expected));
            // the tree and the source record are the only owners
            assert_eq!(Rc::strong_count(&current.data), 2);
            let Some(children) = &current.children else {
                break;
            };
            expected = &expected.get("children").unwrap().as_records().unwrap()[0];
            current = &children[0];
        }
        assert_eq!(current.data.id(), 50);
    }

    #[test]
    fn test_toggled() {
        let state = TreeExpansionState::from_defaults(&StateDefaults::default());
        let expanded = state.toggled(1, false);
        assert_eq!(expanded.states.get(&1), Some(&true));
        let collapsed = expanded.toggled(1, true);
        assert_eq!(collapsed.states.get(&1), Some(&false));
        assert!(state.states.is_empty());
    }
}
