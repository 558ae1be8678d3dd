//! Request and page models shared by the dialects and the page driver

use crate::config::api;

/// Kind of collection being listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Collection {
    #[default]
    Entities,
    Registrations,
}

/// Logical description of a collection request, independent of the dialect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSpec {
    pub collection: Collection,
    pub id: Option<String>,
    pub entity_type: Option<String>,
    pub id_pattern: Option<String>,
    pub type_pattern: Option<String>,
    pub query: Option<String>,
    pub mq: Option<String>,
    pub georel: Option<String>,
    pub geometry: Option<String>,
    pub coords: Option<String>,
    pub attrs: Option<String>,
    pub metadata: Option<String>,
    pub order_by: Option<String>,
    pub key_values: bool,
    pub values: bool,
    pub unique: bool,
}

impl RequestSpec {
    /// True if any entity selector was supplied
    pub fn has_filter(&self) -> bool {
        [
            &self.id,
            &self.entity_type,
            &self.id_pattern,
            &self.type_pattern,
            &self.query,
            &self.georel,
            &self.attrs,
        ]
        .iter()
        .any(|f| f.is_some())
    }

    /// Representation options requested on top of counting
    pub fn options(&self) -> Vec<&'static str> {
        let mut options = Vec::new();
        if self.key_values {
            options.push("keyValues");
        }
        if self.values {
            options.push("values");
        }
        if self.unique {
            options.push("unique");
        }
        options
    }
}

/// How the total count should be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    /// No count requested
    None,
    /// Only the count matters; the page window is minimal
    CountOnly,
    /// Fetch a page and the total count together
    CountAndFetch,
}

/// Offset/limit window of one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// Pagination position for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub page_index: u64,
    pub page_size: u64,
    /// Learned from the first response, fixed afterwards
    pub total_count: Option<u64>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(api::PAGE_SIZE)
    }
}

impl Cursor {
    pub fn new(page_size: u64) -> Self {
        Self {
            page_index: 0,
            page_size,
            total_count: None,
        }
    }

    /// Window of the current page
    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: self.page_index * self.page_size,
            limit: self.page_size,
        }
    }

    /// Record the total count; only the first value is kept
    pub fn set_total(&mut self, total: u64) -> u64 {
        *self.total_count.get_or_insert(total)
    }

    /// Move to the next page if one remains
    pub fn advance(&mut self) -> bool {
        let total = self.total_count.unwrap_or(0);
        if (self.page_index + 1) * self.page_size < total {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Number of pages needed for the known total
    pub fn total_pages(&self) -> u64 {
        self.total_count
            .map(|t| t.div_ceil(self.page_size))
            .unwrap_or(0)
    }
}

/// One server-delivered batch of collection items
#[derive(Debug, Clone)]
pub struct Page {
    pub index: u64,
    pub offset: u64,
    pub total_count: u64,
    pub item_count: usize,
    /// JSON array, or a GeoJSON FeatureCollection wrapping one
    pub body: Vec<u8>,
}
