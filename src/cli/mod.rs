//! CLI argument parsing

mod admin;
mod common;
mod context;
mod list;
mod query;

use clap::{Parser, Subcommand};

use crate::config::defaults;
use crate::ngsi::DialectKind;

pub use admin::{AdminResource, LogArgs, MetricsArgs, VersionArgs};
pub use common::{RenderArgs, SafeString};
pub use context::{ConfigAction, DeleteContextArgs, SetContextArgs, UseContextArgs};
pub use list::{EntitiesArgs, FilterArgs, ListResource, RegistrationsArgs};
pub use query::QueryArgs;

/// NGSI context broker CLI
#[derive(Parser, Debug)]
#[command(name = "ngsictl")]
#[command(version)]
#[command(about = "Query FIWARE NGSIv2 and NGSI-LD context brokers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    // Connection flags precede the subcommand so `config set-context` can
    // reuse the same names.

    /// Named context to use (overrides NGSICTL_CONTEXT and current-context)
    #[arg(long)]
    pub context: Option<String>,

    /// Broker URL (overrides NGSI_HOST and the context)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Broker dialect
    #[arg(long = "ngsi-type", value_enum)]
    pub ngsi_type: Option<DialectKind>,

    /// Bearer token (overrides NGSI_TOKEN and the context)
    #[arg(long)]
    pub token: Option<String>,

    /// Tenant (FIWARE-Service / NGSILD-Tenant)
    #[arg(long)]
    pub tenant: Option<String>,

    /// Scope (FIWARE-ServicePath, NGSIv2 only)
    #[arg(long)]
    pub scope: Option<String>,

    /// Basic auth user
    #[arg(long)]
    pub user: Option<String>,

    /// Basic auth password
    #[arg(long)]
    pub password: Option<String>,

    /// Safe-string handling of forbidden characters
    #[arg(long = "safe-string", value_enum)]
    pub safe_string: Option<SafeString>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL, global = true)]
    pub log_level: String,

    /// Batch mode: no progress spinner
    #[arg(long, global = true)]
    pub batch: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entities or registrations
    #[command(visible_alias = "get")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Query entities with an NGSIv2 batch query
    Query(QueryArgs),

    /// Broker administration
    Admin {
        #[command(subcommand)]
        resource: AdminResource,
    },

    /// Print broker version information
    Version(VersionArgs),

    /// Manage named broker contexts
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}
