//! Batch query command arguments

use clap::Parser;

use super::common::RenderArgs;

/// Arguments for 'query' command (NGSIv2 op/query)
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        ngsictl query --data '{\"entities\":[{\"idPattern\":\".*\",\"type\":\"Room\"}]}'\n  \
        ngsictl query --data @query.json --verbose")]
pub struct QueryArgs {
    /// Query payload as JSON, or @FILE to read it from a file
    #[arg(short = 'd', long)]
    pub data: String,

    /// Ordering criteria
    #[arg(long = "order-by")]
    pub order_by: Option<String>,

    #[command(flatten)]
    pub render: RenderArgs,
}
