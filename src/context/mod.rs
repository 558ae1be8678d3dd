//! Context management module
//!
//! Named contexts bundle broker connection parameters (host, dialect,
//! tenant, credentials) for switching between brokers.

mod commands;
mod models;
mod resolve;
mod store;

pub use commands::run_context_command;
pub use models::{Context, ContextConfig};
pub use resolve::{resolve_active_context, resolve_context_in};
pub use store::ContextStore;
