//! Config management CLI arguments (kubectl-style)

use clap::{Parser, Subcommand};

use super::common::SafeString;
use crate::ngsi::DialectKind;

/// Config subcommands for managing broker contexts
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Set a context entry in the config file
    #[command(name = "set-context")]
    SetContext(SetContextArgs),

    /// Set the current-context in the config file
    #[command(name = "use-context")]
    UseContext(UseContextArgs),

    /// Describe one or many contexts
    #[command(name = "get-contexts")]
    GetContexts,

    /// Display the current-context
    #[command(name = "current-context")]
    CurrentContext,

    /// Delete the specified context from the config file
    #[command(name = "delete-context")]
    DeleteContext(DeleteContextArgs),

    /// Display config file contents
    View,
}

/// Arguments for 'config set-context' subcommand
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
        ngsictl config set-context orion --host localhost:1026\n  \
        ngsictl config set-context scorpio --host http://scorpio:9090 --ngsi-type ld\n  \
        ngsictl config set-context orion --tenant openiot --scope /   # update existing context")]
pub struct SetContextArgs {
    /// Context name
    pub name: String,
    /// Broker URL
    #[arg(long)]
    pub host: Option<String>,
    /// Broker dialect
    #[arg(long = "ngsi-type", value_enum)]
    pub ngsi_type: Option<DialectKind>,
    /// Bearer token (stored in config file)
    #[arg(long)]
    pub token: Option<String>,
    /// Tenant (FIWARE-Service / NGSILD-Tenant)
    #[arg(long)]
    pub tenant: Option<String>,
    /// Scope (FIWARE-ServicePath)
    #[arg(long)]
    pub scope: Option<String>,
    /// Basic auth user
    #[arg(long)]
    pub user: Option<String>,
    /// Basic auth password (stored in config file)
    #[arg(long)]
    pub password: Option<String>,
    /// Safe-string handling of forbidden characters
    #[arg(long = "safe-string", value_enum)]
    pub safe_string: Option<SafeString>,
}

/// Arguments for 'config use-context' subcommand
#[derive(Parser, Debug)]
pub struct UseContextArgs {
    /// Context name to activate
    pub name: String,
}

/// Arguments for 'config delete-context' subcommand
#[derive(Parser, Debug)]
pub struct DeleteContextArgs {
    /// Context name to delete
    pub name: String,
}
