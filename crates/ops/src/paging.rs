//! Paging engine.
//!
//! Slices a collection into fixed-size pages. Invalid paging input never
//! fails the call: it yields an empty page and an error code in the
//! returned metadata.

use alloc::vec::Vec;
use gridkit_core::RecordRef;

/// Reason a page could not be produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PagingError {
    #[default]
    None,
    InvalidPageIndex,
    InvalidRecordsPerPage,
}

/// Requested page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingState {
    /// Zero-based page index.
    pub index: i64,
    pub records_per_page: i64,
}

impl PagingState {
    pub fn new(index: i64, records_per_page: i64) -> Self {
        Self {
            index,
            records_per_page,
        }
    }
}

/// Paging figures reported with every page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingMetadata {
    /// Zero when `records_per_page` is invalid.
    pub total_pages: usize,
    pub total_records: usize,
    pub error: PagingError,
}

/// One page of records and the metadata computed for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub records: Vec<RecordRef>,
    pub metadata: PagingMetadata,
}

/// Returns the requested page of `records`.
///
/// Metadata is always computed before any validity check, so callers see the
/// record and page counts even on error paths.
pub fn page(records: Vec<RecordRef>, state: &PagingState) -> Page {
    let total_records = records.len();
    let per_page = usize::try_from(state.records_per_page).ok().filter(|&n| n > 0);
    let metadata = PagingMetadata {
        total_pages: per_page.map_or(0, |n| total_records.div_ceil(n)),
        total_records,
        error: PagingError::None,
    };

    let Ok(index) = usize::try_from(state.index) else {
        return rejected(metadata, PagingError::InvalidPageIndex);
    };
    let Some(per_page) = per_page else {
        return rejected(metadata, PagingError::InvalidRecordsPerPage);
    };
    if total_records == 0 {
        return Page { records, metadata };
    }
    if index >= metadata.total_pages {
        return rejected(metadata, PagingError::InvalidPageIndex);
    }

    let start = index * per_page;
    let end = (start + per_page).min(total_records);
    let mut records = records;
    // Truncate tail first, then drop the head
    records.truncate(end);
    records.drain(..start);
    log::trace!("page {}: records {}..{} of {}", index, start, end, total_records);
    Page { records, metadata }
}

fn rejected(mut metadata: PagingMetadata, error: PagingError) -> Page {
    log::debug!("paging rejected: {:?}", error);
    metadata.error = error;
    Page {
        records: Vec::new(),
        metadata,
    }
}
