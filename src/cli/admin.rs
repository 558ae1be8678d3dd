//! Broker administration command arguments

use clap::{Parser, Subcommand};

/// Resource types for the 'admin' command
#[derive(Subcommand, Debug)]
pub enum AdminResource {
    /// Show or change the broker log level (NGSIv2 brokers)
    Log(LogArgs),

    /// Show, reset or delete broker metrics
    Metrics(MetricsArgs),
}

/// Arguments for 'admin log' subcommand
#[derive(Parser, Debug)]
pub struct LogArgs {
    /// New log level (none, fatal, error, warn, info, debug)
    #[arg(long)]
    pub level: Option<String>,

    /// Pretty-print the response
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

/// Arguments for 'admin metrics' subcommand
#[derive(Parser, Debug)]
pub struct MetricsArgs {
    /// Return the metrics and reset them
    #[arg(long, conflicts_with = "delete")]
    pub reset: bool,

    /// Delete the metrics
    #[arg(long)]
    pub delete: bool,

    /// Pretty-print the response
    #[arg(short = 'P', long)]
    pub pretty: bool,
}

/// Arguments for 'version' command
#[derive(Parser, Debug)]
pub struct VersionArgs {
    /// Pretty-print the response
    #[arg(short = 'P', long)]
    pub pretty: bool,
}
