//! Paginated collection fetcher
//!
//! Issues page requests through an [`HttpClient`] and exposes the eager
//! and lazy ways of consuming a collection.

use super::types::{BatchCursor, Page, PaginatedList, PaginationMeta};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Lazy sequence of records; each item may wait on a page request
pub type RecordStream<T> = BoxStream<'static, Result<T>>;

/// Fetches pages of a collection and follows next-page links
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: HttpClient,
}

impl PageFetcher {
    /// Create a fetcher using the given client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetch a single page.
    ///
    /// The body must be a JSON array whose elements deserialize into `T`;
    /// pagination metadata comes from the response headers.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        uri: &str,
        request: &RequestConfig,
    ) -> Result<Page<T>> {
        let response = self.client.get(uri, request).await?;
        let meta = PaginationMeta::from_headers(&response.headers)?;
        let records = decode_records(&response.body)?;

        debug!(
            uri,
            records = records.len(),
            total = meta.total_nb_records,
            next = ?meta.next_page_uri,
            "Fetched page"
        );

        Ok(Page::new(records, meta))
    }

    /// Fetch the page after `page`, or `None` if `page` is the last one
    pub async fn fetch_next_page<T: DeserializeOwned>(
        &self,
        page: &Page<T>,
        request: &RequestConfig,
    ) -> Result<Option<Page<T>>> {
        match page.next_page_uri() {
            Some(uri) => self
                .fetch_page(uri, &request.without_query())
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    /// Fetch every page and concatenate the records in page order.
    ///
    /// Totals are taken from the first page. Any failing page fails the
    /// whole call; records gathered so far are dropped.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        first_uri: &str,
        request: RequestConfig,
    ) -> Result<PaginatedList<T>> {
        let mut cursor: BatchCursor<T> = BatchCursor::new(first_uri, request);
        let mut records = Vec::new();
        let mut totals = None;

        while let Some((uri, request)) = cursor.next_request() {
            let page = self.fetch_page::<T>(&uri, &request).await?;
            cursor.advance(&page.meta);
            totals.get_or_insert((page.meta.total_nb_records, page.meta.max_nb_records));
            records.extend(page.records);
        }

        let (total, max) = totals.unwrap_or_default();
        debug!(
            "Fetched {} records in {} pages from {}",
            records.len(),
            cursor.pages_fetched(),
            first_uri
        );

        Ok(PaginatedList {
            records,
            pagination_total_nb_records: total,
            pagination_max_nb_records: max,
            pages_fetched: cursor.pages_fetched(),
        })
    }

    /// Lazily yield the records of a collection, one at a time.
    ///
    /// A page is requested only when the consumer polls for a record and
    /// the previous page is used up. Dropping the stream stops the walk.
    /// After an error the stream ends.
    pub fn iterate<T>(&self, first_uri: &str, request: RequestConfig) -> RecordStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.stream(BatchCursor::new(first_uri, request))
    }

    /// Lazily yield the records of `page`, then of every page after it
    pub fn iterate_from<T>(&self, page: Page<T>, request: &RequestConfig) -> RecordStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.stream(BatchCursor::resume(page, request))
    }

    fn stream<T>(&self, cursor: BatchCursor<T>) -> RecordStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let fetcher = self.clone();

        stream::try_unfold((fetcher, cursor), |(fetcher, mut cursor)| async move {
            loop {
                if let Some(record) = cursor.pop_record() {
                    return Ok(Some((record, (fetcher, cursor))));
                }

                let Some((uri, request)) = cursor.next_request() else {
                    return Ok(None);
                };

                let page = fetcher.fetch_page::<T>(&uri, &request).await?;
                cursor.advance(&page.meta);
                cursor.push_records(page.records);
            }
        })
        .boxed()
    }
}

/// Decode a page body into records
fn decode_records<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(Error::decode(format!(
            "Expected a JSON array of records, got {}",
            json_kind(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| Error::decode(format!("Record {index} has an unexpected shape: {e}")))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
