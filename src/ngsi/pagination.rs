//! Sequential page fetching for server-paginated collections
//!
//! One request per fixed-size page, each awaited before the next is built.
//! The total count from the first response decides how many pages follow.

use futures::stream::{self, Stream};
use log::debug;
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::error::{NgsiError, Result};
use crate::ngsi::client::{NgsiClient, RawResponse};
use crate::ngsi::models::{CountMode, Cursor, Page, PageWindow, RequestSpec};
use crate::ngsi::safe_string;

/// A paginated collection request
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Collection path, e.g. `/v2/entities`
    pub path: String,
    pub spec: RequestSpec,
    /// JSON body; requests with a body are sent as POST
    pub body: Option<Vec<u8>>,
    /// Label for error messages
    pub label: String,
}

impl PageRequest {
    pub fn get(path: String, spec: RequestSpec, label: &str) -> Self {
        Self {
            path,
            spec,
            body: None,
            label: label.to_string(),
        }
    }

    pub fn post(path: String, spec: RequestSpec, body: Vec<u8>, label: &str) -> Self {
        Self {
            path,
            spec,
            body: Some(body),
            label: label.to_string(),
        }
    }
}

/// Page bodies are arrays, or a FeatureCollection wrapping one
#[derive(Deserialize)]
#[serde(untagged)]
enum PageShape {
    Array(Vec<IgnoredAny>),
    FeatureCollection { features: Vec<IgnoredAny> },
}

fn count_items(body: &[u8]) -> Result<usize> {
    match serde_json::from_slice::<PageShape>(body) {
        Ok(PageShape::Array(items)) => Ok(items.len()),
        Ok(PageShape::FeatureCollection { features }) => Ok(features.len()),
        Err(e) => Err(NgsiError::Decode(format!(
            "page body is neither a JSON array nor a FeatureCollection: {}",
            e
        ))),
    }
}

async fn send(
    client: &NgsiClient,
    request: &PageRequest,
    mode: CountMode,
    window: PageWindow,
) -> Result<RawResponse> {
    let query = client.dialect().page_query(&request.spec, mode, window);
    let response = match &request.body {
        Some(body) => client.post(&request.path, &query, body.clone()).await?,
        None => client.get(&request.path, &query).await?,
    };
    response.error_for_status(&request.label)
}

/// Issue one count-only request and return the total
pub async fn fetch_count(client: &NgsiClient, request: &PageRequest) -> Result<u64> {
    let window = PageWindow {
        offset: 0,
        limit: 1,
    };
    let response = send(client, request, CountMode::CountOnly, window).await?;
    let count = client.dialect().results_count(&response.headers)?;
    debug!("{} count: {}", request.label, count);
    Ok(count)
}

/// Drives page-by-page retrieval of one collection
pub struct PageDriver<'a> {
    client: &'a NgsiClient,
    request: PageRequest,
    cursor: Cursor,
    done: bool,
}

impl<'a> PageDriver<'a> {
    pub fn new(client: &'a NgsiClient, request: PageRequest) -> Self {
        Self {
            client,
            request,
            cursor: Cursor::default(),
            done: false,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Fetch the next page, `None` once the collection is exhausted
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        if self.done {
            return Ok(None);
        }

        let window = self.cursor.window();
        debug!(
            "Fetching {} page {} (offset {}, limit {})",
            self.request.label,
            self.cursor.page_index + 1,
            window.offset,
            window.limit
        );
        let response = send(self.client, &self.request, CountMode::CountAndFetch, window).await?;

        let reported = self.client.dialect().results_count(&response.headers)?;
        let total = self.cursor.set_total(reported);
        if total == 0 {
            debug!("{}: no results", self.request.label);
            self.done = true;
            return Ok(None);
        }

        let body = if self.client.is_safe_string() {
            safe_string::decode_json(&response.body)?
        } else {
            response.body
        };
        let item_count = count_items(&body)?;

        let page = Page {
            index: self.cursor.page_index,
            offset: window.offset,
            total_count: total,
            item_count,
            body,
        };
        debug!(
            "Page {}/{} returned {} items (total {})",
            page.index + 1,
            self.cursor.total_pages(),
            item_count,
            total
        );

        if item_count == 0 || !self.cursor.advance() {
            self.done = true;
        }
        Ok(Some(page))
    }

    /// Lazily yield pages as a stream
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> + 'a {
        stream::try_unfold(self, |mut driver| async move {
            let page = driver.next_page().await?;
            Ok::<_, NgsiError>(page.map(|page| (page, driver)))
        })
    }
}
