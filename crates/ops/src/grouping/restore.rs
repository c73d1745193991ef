//! Rebuilds the visible grouped sequence from expansion state.

use super::expansion::GroupByExpandState;
use super::record::{GroupArena, GroupId, GroupedData, GroupedRow};
use crate::sorting::SortingStrategy;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Visible rows after applying group expansion.
#[derive(Clone, Debug, Default)]
pub struct RestoredGroups {
    /// Headers and records the display shows, in order.
    pub rows: Vec<GroupedRow>,
    /// Groups at the outermost level, in display order.
    pub top_level: Vec<GroupId>,
    child_groups: HashMap<GroupId, Vec<GroupId>>,
}

impl RestoredGroups {
    /// Child group headers of `id`, kept even while `id` is collapsed.
    pub fn child_groups(&self, id: GroupId) -> &[GroupId] {
        self.child_groups.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Reconstructs the visible rows of `data` for a grouping `depth`.
///
/// Works from the innermost level outwards: at each level, runs of rows
/// sharing the same parent are prefixed with that parent's header, and the
/// run itself is kept only when the parent is expanded. Expansion entries
/// match a group when every level's value compares equal under `strategy`,
/// as grouping compared it. A group with no matching entry in `expansion`
/// uses `default_expanded`.
pub fn restore(
    data: &GroupedData,
    depth: usize,
    expansion: &[GroupByExpandState],
    default_expanded: bool,
    strategy: &dyn SortingStrategy,
) -> RestoredGroups {
    if depth == 0 {
        return RestoredGroups {
            rows: data.rows.clone(),
            ..RestoredGroups::default()
        };
    }

    let members: Vec<GroupedRow> = data
        .rows
        .iter()
        .filter(|row| row.as_record().is_some())
        .cloned()
        .collect();

    let mut restorer = Restorer {
        arena: &data.arena,
        expansion,
        default_expanded,
        strategy,
        depth,
        child_groups: HashMap::new(),
        visited: VecDeque::new(),
    };
    let rows = restorer.restore_level(members, 0);
    log::trace!(
        "restore: {} visible rows over {} levels",
        rows.len(),
        depth
    );
    RestoredGroups {
        rows,
        top_level: restorer.visited.into_iter().collect(),
        child_groups: restorer.child_groups,
    }
}

struct Restorer<'a> {
    arena: &'a GroupArena,
    expansion: &'a [GroupByExpandState],
    default_expanded: bool,
    strategy: &'a dyn SortingStrategy,
    depth: usize,
    child_groups: HashMap<GroupId, Vec<GroupId>>,
    /// Rolling window of headers emitted at the current level.
    visited: VecDeque<GroupId>,
}

impl Restorer<'_> {
    /// Emits the headers of groups at `level` around `items`, after the
    /// deeper levels have been restored.
    fn restore_level(&mut self, items: Vec<GroupedRow>, level: usize) -> Vec<GroupedRow> {
        self.visited.clear();
        let items = if level + 1 < self.depth {
            self.restore_level(items, level + 1)
        } else {
            items
        };

        let mut result = Vec::with_capacity(items.len());
        let mut i = 0;
        while i < items.len() {
            let Some(group) = items[i].parent_in(self.arena) else {
                result.push(items[i].clone());
                i += 1;
                continue;
            };
            let group_level = self.arena.level(group);

            let mut j = i + 1;
            while j < items.len() {
                let next = items[j].parent_in(self.arena);
                if next != Some(group) && next.and_then(|n| self.arena.level(n)) == group_level {
                    break;
                }
                j += 1;
            }
            let run = &items[i..j];

            let expanded = self.is_expanded(group);
            result.push(GroupedRow::Group(group));
            self.visited.push_back(group);

            let children = run
                .iter()
                .filter_map(GroupedRow::as_group)
                .filter(|&child| {
                    self.arena.get(child).map_or(false, |c| {
                        !c.records.is_empty() && Some(c.level) == group_level.map(|l| l + 1)
                    })
                })
                .collect();
            self.child_groups.insert(group, children);

            while let Some(&front) = self.visited.front() {
                if self.arena.level(front).map_or(false, |l| l > level) {
                    self.visited.pop_front();
                } else {
                    break;
                }
            }

            if expanded {
                result.extend_from_slice(run);
            }
            i = j;
        }
        result
    }

    fn is_expanded(&self, group: GroupId) -> bool {
        self.expansion
            .iter()
            .find(|state| {
                self.arena
                    .matches_hierarchy(group, &state.hierarchy, self.strategy)
            })
            .map_or(self.default_expanded, |state| state.expanded)
    }
}
