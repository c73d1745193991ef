//! Pipeline orchestrator.
//!
//! `process` threads records through filter, sort and page, always in that
//! order; an absent stage passes its input through. Grouping reshapes the
//! sequence and has its own entry point, `group_and_restore`.

use crate::defaults::StateDefaults;
use crate::filtering::{filter_with_defaults, FilteringState};
use crate::grouping::{
    group_with_defaults, restore_groups_with_defaults, GroupedData, GroupingState, RestoredGroups,
};
use crate::paging::{page, PagingMetadata, PagingState};
use crate::sorting::{sort_with_defaults, SortingState};
use alloc::vec::Vec;
use gridkit_core::RecordRef;

/// Declarative state for one `process` call.
#[derive(Clone, Debug, Default)]
pub struct DataState {
    pub filtering: Option<FilteringState>,
    pub sorting: Option<SortingState>,
    pub paging: Option<PagingState>,
}

impl DataState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filtering(mut self, filtering: FilteringState) -> Self {
        self.filtering = Some(filtering);
        self
    }

    pub fn with_sorting(mut self, sorting: SortingState) -> Self {
        self.sorting = Some(sorting);
        self
    }

    pub fn with_paging(mut self, paging: PagingState) -> Self {
        self.paging = Some(paging);
        self
    }
}

/// Output of `process`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessResult {
    pub records: Vec<RecordRef>,
    /// Present when the paging stage ran.
    pub paging: Option<PagingMetadata>,
}

/// Runs the pipeline with the library defaults.
pub fn process(records: Vec<RecordRef>, state: &DataState) -> ProcessResult {
    process_with_defaults(records, state, &StateDefaults::default())
}

/// Runs filter, sort and page in order, filling unset state from `defaults`.
pub fn process_with_defaults(
    records: Vec<RecordRef>,
    state: &DataState,
    defaults: &StateDefaults,
) -> ProcessResult {
    let input = records.len();
    let mut records = records;
    if let Some(filtering) = &state.filtering {
        records = filter_with_defaults(records, filtering, defaults);
    }
    if let Some(sorting) = &state.sorting {
        records = sort_with_defaults(records, sorting, defaults);
    }
    let mut metadata = None;
    if let Some(paging) = &state.paging {
        let page = page(records, paging);
        records = page.records;
        metadata = Some(page.metadata);
    }
    log::trace!("process: {} -> {} records", input, records.len());
    ProcessResult {
        records,
        paging: metadata,
    }
}

/// Grouped data together with its visible rows.
#[derive(Clone, Debug, Default)]
pub struct GroupedView {
    pub data: GroupedData,
    pub restored: RestoredGroups,
}

/// Sorts, groups and restores `records` for display.
///
/// Records are sorted by the grouping expressions first, then by any sorting
/// expression on a field that is not grouped.
pub fn group_and_restore(
    records: Vec<RecordRef>,
    grouping: &GroupingState,
    sorting: Option<&SortingState>,
    defaults: &StateDefaults,
) -> GroupedView {
    let mut order = SortingState::new(grouping.expressions.clone());
    order.strategy = grouping.strategy.clone();
    if let Some(sorting) = sorting {
        order.expressions.extend(
            sorting
                .expressions
                .iter()
                .filter(|e| grouping.expressions.iter().all(|g| g.field_name != e.field_name))
                .cloned(),
        );
        if order.strategy.is_none() {
            order.strategy = sorting.strategy.clone();
        }
    }

    let sorted = sort_with_defaults(records, &order, defaults);
    let data = group_with_defaults(sorted, grouping, defaults);
    let restored = restore_groups_with_defaults(&data, grouping, defaults);
    GroupedView { data, restored }
}
