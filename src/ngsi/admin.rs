//! Broker administration and version command handlers

use log::debug;
use reqwest::StatusCode;
use std::io::Write;

use crate::cli::{AdminResource, LogArgs, MetricsArgs, VersionArgs};
use crate::config::api;
use crate::error::{NgsiError, Result};
use crate::ngsi::client::NgsiClient;
use crate::ngsi::dialect::DialectKind;
use crate::output::print_response;

fn require_v2(client: &NgsiClient, what: &str) -> Result<()> {
    if client.dialect_kind() != DialectKind::V2 {
        return Err(NgsiError::Config(format!(
            "{} is only available on NGSIv2",
            what
        )));
    }
    Ok(())
}

/// Normalize and validate a broker log level
pub fn validate_log_level(level: &str) -> Result<String> {
    let lower = level.to_lowercase();
    if api::LOG_LEVELS.contains(&lower.as_str()) {
        Ok(lower.to_uppercase())
    } else {
        Err(NgsiError::Config(format!(
            "log level error: {} ({})",
            level,
            api::LOG_LEVELS.join(", ")
        )))
    }
}

/// Show or change the broker log level
pub async fn admin_log<W: Write>(client: &NgsiClient, args: &LogArgs, mut out: W) -> Result<()> {
    require_v2(client, "admin log")?;

    match &args.level {
        Some(level) => {
            let level = validate_log_level(level)?;
            debug!("Setting broker log level to {}", level);
            client
                .put(api::ADMIN_LOG, &[("level".to_string(), level)])
                .await?
                .error_for_status("admin log")?;
            Ok(())
        }
        None => {
            let response = client
                .get(api::ADMIN_LOG, &[])
                .await?
                .error_for_status("admin log")?;
            print_response(&mut out, &response.body, args.pretty)
        }
    }
}

/// Show, reset or delete broker metrics
pub async fn admin_metrics<W: Write>(
    client: &NgsiClient,
    args: &MetricsArgs,
    mut out: W,
) -> Result<()> {
    require_v2(client, "admin metrics")?;
    if args.reset && args.delete {
        return Err(NgsiError::Config(
            "specify either --reset or --delete".to_string(),
        ));
    }

    if args.delete {
        let response = client.delete(api::ADMIN_METRICS).await?;
        if response.status != StatusCode::NO_CONTENT {
            return Err(NgsiError::Api {
                status: response.status.as_u16(),
                message: format!(
                    "Failed to delete metrics: {} {}",
                    response.status,
                    response.body_text()
                ),
            });
        }
        return Ok(());
    }

    let query = if args.reset {
        vec![("reset".to_string(), "true".to_string())]
    } else {
        Vec::new()
    };
    let response = client
        .get(api::ADMIN_METRICS, &query)
        .await?
        .error_for_status("admin metrics")?;
    print_response(&mut out, &response.body, args.pretty)
}

/// Print broker version information
pub async fn broker_version<W: Write>(
    client: &NgsiClient,
    args: &VersionArgs,
    mut out: W,
) -> Result<()> {
    let response = client
        .get(api::VERSION, &[])
        .await?
        .error_for_status("version")?;
    print_response(&mut out, &response.body, args.pretty)
}

/// Run the 'admin' command
pub async fn run_admin_command(client: &NgsiClient, resource: &AdminResource) -> Result<()> {
    match resource {
        AdminResource::Log(args) => admin_log(client, args, std::io::stdout()).await,
        AdminResource::Metrics(args) => admin_metrics(client, args, std::io::stdout()).await,
    }
}

/// Run the 'version' command
pub async fn run_version_command(client: &NgsiClient, args: &VersionArgs) -> Result<()> {
    broker_version(client, args, std::io::stdout()).await
}
