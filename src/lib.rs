//! ngsictl - Query FIWARE NGSIv2 and NGSI-LD context brokers
//!
//! A CLI for listing entities and registrations from a context broker,
//! transparently following server-side pagination.
//!
//! # Features
//!
//! - NGSIv2 and NGSI-LD brokers behind one command set
//! - Automatic pagination with streamed, valid JSON output
//! - Output as ids, JSON lines, or one (pretty) JSON document
//! - GeoJSON FeatureCollections re-assembled across pages (NGSI-LD)
//! - Safe-string decoding of forbidden characters
//! - Named broker contexts
//!
//! # Example
//!
//! ```bash
//! # List entity ids
//! ngsictl list entities --type Room
//!
//! # All entities as one pretty JSON document
//! ngsictl list entities --type Room --verbose --pretty
//!
//! # NGSI-LD entities as GeoJSON
//! ngsictl --ngsi-type ld list entities --type Shelf --accept-geo-json
//!
//! # Count only
//! ngsictl list entities --count
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod ngsi;
pub mod output;
pub mod ui;

pub use cli::{Cli, Command, ListResource, RenderArgs};
pub use error::{NgsiError, Result};
pub use ngsi::{
    connect, run_admin_command, run_entities_command, run_query_command,
    run_registrations_command, run_version_command, DialectKind, NgsiClient,
};
pub use output::{JsonArrayStream, PageRenderer, RenderMode};
