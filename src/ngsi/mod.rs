//! NGSI broker client module
//!
//! Dialect mapping, sequential pagination, safe-string handling and the
//! command handlers built on them.

pub mod admin;
mod client;
mod connect;
mod credentials;
pub mod dialect;
pub mod entities;
pub mod listing;
mod models;
pub mod pagination;
pub mod registrations;
pub mod safe_string;

pub use admin::{run_admin_command, run_version_command};
pub use client::{NgsiClient, RawResponse};
pub use connect::{connect, Connection};
pub use credentials::{Auth, TokenResolver};
pub use dialect::{Dialect, DialectKind, NgsiLd, NgsiV2, QueryParams};
pub use entities::{run_entities_command, run_query_command};
pub use listing::run_listing;
pub use models::{Collection, CountMode, Cursor, Page, PageWindow, RequestSpec};
pub use pagination::{fetch_count, PageDriver, PageRequest};
pub use registrations::run_registrations_command;
