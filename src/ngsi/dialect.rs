//! NGSIv2 / NGSI-LD request and response mapping
//!
//! Both dialects share one page driver; each implementation maps a
//! [`RequestSpec`] onto its own query parameters and reads the total
//! count from its own response header.

use clap::ValueEnum;
use log::debug;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::config::{api, headers};
use crate::error::{NgsiError, Result};
use crate::ngsi::models::{Collection, CountMode, PageWindow, RequestSpec};

/// Supported broker dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// NGSIv2 (legacy)
    #[default]
    V2,
    /// NGSI-LD (linked data)
    Ld,
}

impl DialectKind {
    /// Adapter implementing this dialect
    pub fn adapter(self) -> &'static dyn Dialect {
        match self {
            DialectKind::V2 => &NgsiV2,
            DialectKind::Ld => &NgsiLd,
        }
    }
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialectKind::V2 => write!(f, "v2"),
            DialectKind::Ld => write!(f, "ld"),
        }
    }
}

/// Query parameters of one request
pub type QueryParams = Vec<(String, String)>;

/// Request/response vocabulary of one broker dialect
pub trait Dialect: Send + Sync {
    fn kind(&self) -> DialectKind;

    /// API root, e.g. `/v2`
    fn base_path(&self) -> &'static str;

    /// Context source registrations collection
    fn registrations_path(&self) -> String;

    /// Response header carrying the total count
    fn count_header(&self) -> &'static str;

    /// Accept header for collection requests
    fn accept(&self, geojson: bool) -> &'static str;

    /// Tenant and scope headers
    fn tenant_headers(&self, tenant: Option<&str>, scope: Option<&str>) -> Vec<(&'static str, String)>;

    /// Build the query parameters for one page request
    fn page_query(&self, spec: &RequestSpec, mode: CountMode, window: PageWindow) -> QueryParams;

    fn entities_path(&self) -> String {
        format!("{}/{}", self.base_path(), api::ENTITIES)
    }

    /// Extract the total count from response headers
    fn results_count(&self, headers: &HeaderMap) -> Result<u64> {
        let name = self.count_header();
        let value = headers
            .get(name)
            .ok_or_else(|| NgsiError::CountUnavailable(format!("missing {} header", name)))?;
        let text = value
            .to_str()
            .map_err(|e| NgsiError::CountUnavailable(format!("{} header: {}", name, e)))?;
        text.trim().parse::<u64>().map_err(|e| {
            NgsiError::CountUnavailable(format!("{} header '{}': {}", name, text, e))
        })
    }
}

fn push(params: &mut QueryParams, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        params.push((key.to_string(), v.clone()));
    }
}

fn push_window(params: &mut QueryParams, window: PageWindow) {
    params.push(("limit".to_string(), window.limit.to_string()));
    params.push(("offset".to_string(), window.offset.to_string()));
}

/// NGSIv2 dialect
#[derive(Debug, Clone, Copy)]
pub struct NgsiV2;

impl Dialect for NgsiV2 {
    fn kind(&self) -> DialectKind {
        DialectKind::V2
    }

    fn base_path(&self) -> &'static str {
        api::V2_BASE_PATH
    }

    fn registrations_path(&self) -> String {
        format!("{}/{}", api::V2_BASE_PATH, api::V2_REGISTRATIONS)
    }

    fn count_header(&self) -> &'static str {
        headers::V2_TOTAL_COUNT
    }

    fn accept(&self, _geojson: bool) -> &'static str {
        "application/json"
    }

    fn tenant_headers(&self, tenant: Option<&str>, scope: Option<&str>) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(t) = tenant {
            out.push((headers::V2_SERVICE, t.to_string()));
        }
        if let Some(s) = scope {
            out.push((headers::V2_SERVICE_PATH, s.to_string()));
        }
        out
    }

    fn page_query(&self, spec: &RequestSpec, mode: CountMode, window: PageWindow) -> QueryParams {
        let mut params = QueryParams::new();
        push(&mut params, "id", &spec.id);
        push(&mut params, "type", &spec.entity_type);
        push(&mut params, "idPattern", &spec.id_pattern);
        push(&mut params, "typePattern", &spec.type_pattern);
        push(&mut params, "q", &spec.query);
        push(&mut params, "mq", &spec.mq);
        push(&mut params, "georel", &spec.georel);
        push(&mut params, "geometry", &spec.geometry);
        push(&mut params, "coords", &spec.coords);
        push(&mut params, "attrs", &spec.attrs);
        push(&mut params, "metadata", &spec.metadata);
        push(&mut params, "orderBy", &spec.order_by);

        let mut options = spec.options();
        match mode {
            CountMode::CountOnly => {
                // A count needs no representation options and a single item
                params.push(("options".to_string(), "count".to_string()));
                params.push(("limit".to_string(), "1".to_string()));
            }
            CountMode::CountAndFetch => {
                options.push("count");
                params.push(("options".to_string(), options.join(",")));
                push_window(&mut params, window);
            }
            CountMode::None => {
                if !options.is_empty() {
                    params.push(("options".to_string(), options.join(",")));
                }
                push_window(&mut params, window);
            }
        }
        params
    }
}

/// NGSI-LD dialect
#[derive(Debug, Clone, Copy)]
pub struct NgsiLd;

impl Dialect for NgsiLd {
    fn kind(&self) -> DialectKind {
        DialectKind::Ld
    }

    fn base_path(&self) -> &'static str {
        api::LD_BASE_PATH
    }

    fn registrations_path(&self) -> String {
        format!("{}/{}", api::LD_BASE_PATH, api::LD_REGISTRATIONS)
    }

    fn count_header(&self) -> &'static str {
        headers::LD_RESULTS_COUNT
    }

    fn accept(&self, geojson: bool) -> &'static str {
        if geojson {
            "application/geo+json"
        } else {
            "application/json"
        }
    }

    fn tenant_headers(&self, tenant: Option<&str>, _scope: Option<&str>) -> Vec<(&'static str, String)> {
        tenant
            .map(|t| vec![(headers::LD_TENANT, t.to_string())])
            .unwrap_or_default()
    }

    fn page_query(&self, spec: &RequestSpec, mode: CountMode, window: PageWindow) -> QueryParams {
        let mut params = QueryParams::new();
        push(&mut params, "id", &spec.id);
        push(&mut params, "type", &spec.entity_type);
        push(&mut params, "idPattern", &spec.id_pattern);
        push(&mut params, "q", &spec.query);
        push(&mut params, "georel", &spec.georel);
        push(&mut params, "geometry", &spec.geometry);
        push(&mut params, "coords", &spec.coords);
        push(&mut params, "attrs", &spec.attrs);

        if spec.type_pattern.is_some() || spec.mq.is_some() || spec.metadata.is_some() {
            debug!("typePattern, mq and metadata are not supported by NGSI-LD, ignoring");
        }

        // An unfiltered NGSI-LD entity query would otherwise be rejected
        if spec.collection == Collection::Entities && !spec.has_filter() {
            params.push(("idPattern".to_string(), ".*".to_string()));
        }

        if spec.key_values {
            params.push(("options".to_string(), "keyValues".to_string()));
        }

        match mode {
            CountMode::CountOnly => {
                params.push(("count".to_string(), "true".to_string()));
                params.push(("limit".to_string(), "0".to_string()));
            }
            CountMode::CountAndFetch => {
                params.push(("count".to_string(), "true".to_string()));
                push_window(&mut params, window);
            }
            CountMode::None => push_window(&mut params, window),
        }
        params
    }
}
