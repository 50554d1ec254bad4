//! Pagination module
//!
//! Walks multi-page REST collections by following the server's next-page
//! link.
//!
//! # Overview
//!
//! A collection endpoint returns a JSON array of records per page and
//! describes the walk in response headers (total count, page size, next
//! page URI). [`PageFetcher`] offers two ways to consume it:
//!
//! - **Eager**: [`PageFetcher::fetch_all`] loads every page into a [`PaginatedList`]
//! - **Lazy**: [`PageFetcher::iterate`] yields one record at a time and only
//!   requests the next page when the consumer asks for a record beyond the
//!   current one
//!
//! Pages are fetched strictly one after another; nothing is prefetched,
//! retried, reordered or deduplicated.

mod fetcher;
mod types;

pub use fetcher::{PageFetcher, RecordStream};
pub use types::{
    BatchCursor, Page, PaginatedList, PaginationMeta, CURRENT_OFFSET_HEADER, MAX_NB_RECORDS_HEADER,
    NEXT_OFFSET_HEADER, NEXT_PAGE_URI_HEADER, TOTAL_NB_RECORDS_HEADER,
};
