//! Pagination types
//!
//! Page descriptors, the eager result list and the cursor that drives a walk.

use crate::error::{Error, Result};
use crate::http::RequestConfig;
use reqwest::header::HeaderMap;
use std::collections::VecDeque;

/// Total number of records in the collection
pub const TOTAL_NB_RECORDS_HEADER: &str = "X-Killbill-Pagination-TotalNbRecords";

/// Maximum number of records the server returns per page
pub const MAX_NB_RECORDS_HEADER: &str = "X-Killbill-Pagination-MaxNbRecords";

/// Offset of the first record of this page
pub const CURRENT_OFFSET_HEADER: &str = "X-Killbill-Pagination-CurrentOffset";

/// Offset of the first record of the next page
pub const NEXT_OFFSET_HEADER: &str = "X-Killbill-Pagination-NextOffset";

/// URI of the next page; absent on the last page
pub const NEXT_PAGE_URI_HEADER: &str = "X-Killbill-Pagination-NextPageUri";

// ============================================================================
// Page metadata
// ============================================================================

/// Pagination metadata read from response headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Total records in the collection (0 when not reported)
    pub total_nb_records: u64,
    /// Records per page cap (0 when not reported)
    pub max_nb_records: u64,
    /// Offset of this page
    pub current_offset: Option<u64>,
    /// Offset of the next page
    pub next_offset: Option<u64>,
    /// URI of the next page, verbatim from the server
    pub next_page_uri: Option<String>,
}

impl PaginationMeta {
    /// Read pagination metadata from response headers.
    ///
    /// Missing counts read as zero; a count that is present but not a
    /// number is a decode error. An empty next-page header means there is
    /// no next page.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let next_page_uri = header_str(headers, NEXT_PAGE_URI_HEADER)?
            .filter(|uri| !uri.is_empty())
            .map(String::from);

        Ok(Self {
            total_nb_records: parse_count(headers, TOTAL_NB_RECORDS_HEADER)?.unwrap_or(0),
            max_nb_records: parse_count(headers, MAX_NB_RECORDS_HEADER)?.unwrap_or(0),
            current_offset: parse_count(headers, CURRENT_OFFSET_HEADER)?,
            next_offset: parse_count(headers, NEXT_OFFSET_HEADER)?,
            next_page_uri,
        })
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page_uri.is_some()
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>> {
    match headers.get(name) {
        Some(value) => value
            .to_str()
            .map(|s| Some(s.trim()))
            .map_err(|_| Error::decode(format!("Header '{name}' is not valid text"))),
        None => Ok(None),
    }
}

fn parse_count(headers: &HeaderMap, name: &str) -> Result<Option<u64>> {
    match header_str(headers, name)? {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<u64>().map(Some).map_err(|_| {
            Error::decode(format!("Header '{name}' is not a record count: '{raw}'"))
        }),
    }
}

// ============================================================================
// Page
// ============================================================================

/// One page of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records, in server order
    pub records: Vec<T>,
    /// Pagination metadata of this page
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(records: Vec<T>, meta: PaginationMeta) -> Self {
        Self { records, meta }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn total_nb_records(&self) -> u64 {
        self.meta.total_nb_records
    }

    pub fn max_nb_records(&self) -> u64 {
        self.meta.max_nb_records
    }

    pub fn next_page_uri(&self) -> Option<&str> {
        self.meta.next_page_uri.as_deref()
    }

    pub fn has_next_page(&self) -> bool {
        self.meta.has_next_page()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

// ============================================================================
// Eager result
// ============================================================================

/// Every record of a collection, with the totals reported on the first page
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedList<T> {
    /// Records, concatenated in page order
    pub records: Vec<T>,
    /// Total record count reported by the first page
    pub pagination_total_nb_records: u64,
    /// Per-page cap reported by the first page
    pub pagination_max_nb_records: u64,
    /// Number of pages requested
    pub pages_fetched: usize,
}

impl<T> PaginatedList<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

impl<T> IntoIterator for PaginatedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// Mutable state of one walk over a collection.
///
/// The first request carries the caller's query parameters; every later
/// request goes to the server's next-page URI with the same headers only.
#[derive(Debug)]
pub struct BatchCursor<T> {
    current_page_uri: Option<String>,
    request: RequestConfig,
    buffer: VecDeque<T>,
    exhausted: bool,
    pages_fetched: usize,
}

impl<T> BatchCursor<T> {
    /// Cursor positioned before the first page
    pub fn new(first_uri: impl Into<String>, request: RequestConfig) -> Self {
        Self {
            current_page_uri: Some(first_uri.into()),
            request,
            buffer: VecDeque::new(),
            exhausted: false,
            pages_fetched: 0,
        }
    }

    /// Cursor positioned after an already-fetched page, with its records buffered
    pub fn resume(page: Page<T>, request: &RequestConfig) -> Self {
        let mut cursor = Self {
            current_page_uri: None,
            request: request.without_query(),
            buffer: VecDeque::new(),
            exhausted: false,
            pages_fetched: 0,
        };
        cursor.advance(&page.meta);
        cursor.push_records(page.records);
        cursor
    }

    /// URI and request config of the next page to fetch, if any
    pub fn next_request(&self) -> Option<(String, RequestConfig)> {
        if self.exhausted {
            return None;
        }
        self.current_page_uri
            .clone()
            .map(|uri| (uri, self.request.clone()))
    }

    /// Record that a page was fetched and move to the page after it
    pub fn advance(&mut self, meta: &PaginationMeta) {
        self.pages_fetched += 1;
        self.current_page_uri.clone_from(&meta.next_page_uri);
        self.exhausted = self.current_page_uri.is_none();
        if !self.request.query.is_empty() {
            self.request = self.request.without_query();
        }
    }

    pub fn push_records(&mut self, records: Vec<T>) {
        self.buffer.extend(records);
    }

    pub fn pop_record(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    /// No page left to fetch (buffered records may remain)
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Nothing left to fetch and nothing buffered
    pub fn is_done(&self) -> bool {
        self.exhausted && self.buffer.is_empty()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn current_page_uri(&self) -> Option<&str> {
        self.current_page_uri.as_deref()
    }
}
