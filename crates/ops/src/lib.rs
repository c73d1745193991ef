//! Gridkit Ops - data-processing pipeline for tabular record collections.
//!
//! This crate provides the engines a data grid runs over its records:
//!
//! - `sorting`: stable multi-key sorting with pluggable strategies
//! - `filtering`: AND/OR expression trees over typed conditions
//! - `paging`: fixed-size page slicing with error metadata
//! - `grouping`: group headers over sorted data and expansion-aware restoration
//! - `tree`: hierarchize nested records and flatten them for display
//! - `pipeline`: filter, sort and page in one call
//! - `defaults`: library defaults merged into partially specified states
//!
//! # Example
//!
//! ```rust
//! use gridkit_core::Record;
//! use gridkit_ops::{process, DataState, PagingState, SortingExpression, SortingState};
//!
//! let records = vec![
//!     Record::empty(1).with("age", 40i64).into_ref(),
//!     Record::empty(2).with("age", 25i64).into_ref(),
//!     Record::empty(3).with("age", 33i64).into_ref(),
//! ];
//! let state = DataState::new()
//!     .with_sorting(SortingState::new(vec![SortingExpression::asc("age")]))
//!     .with_paging(PagingState::new(0, 2));
//!
//! let result = process(records, &state);
//! let ids: Vec<u64> = result.records.iter().map(|r| r.id()).collect();
//! assert_eq!(ids, vec![2, 3]);
//! assert_eq!(result.paging.unwrap().total_pages, 2);
//! ```

#![no_std]

extern crate alloc;

pub mod defaults;
pub mod filtering;
pub mod grouping;
pub mod paging;
pub mod pipeline;
pub mod sorting;
pub mod tree;

pub use defaults::StateDefaults;
pub use filtering::{
    filter, filter_field, filter_with_defaults, FilterColumn, FilteringCondition,
    FilteringExpression, FilteringExpressionsTree, FilteringLogic, FilteringState,
    FilteringStrategy,
};
pub use grouping::{
    group, group_with_defaults, restore_groups, restore_groups_with_defaults, GroupByExpandState,
    GroupByKey, GroupedData, GroupedRow, GroupingState, RestoredGroups,
};
pub use paging::{page, Page, PagingError, PagingMetadata, PagingState};
pub use pipeline::{
    group_and_restore, process, process_with_defaults, DataState, GroupedView, ProcessResult,
};
pub use sorting::{
    sort, sort_with_defaults, SortingDirection, SortingExpression, SortingState, SortingStrategy,
};
pub use tree::{
    flatten, hierarchize, ExpansionLookup, FlatRecord, HierarchicalRecord, TreeExpansionState,
};
