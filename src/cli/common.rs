//! Common CLI types shared across commands

use clap::{Args, ValueEnum};

use crate::output::RenderMode;

/// Safe-string handling of forbidden characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SafeString {
    On,
    Off,
}

impl SafeString {
    pub fn is_on(self) -> bool {
        self == SafeString::On
    }
}

impl std::fmt::Display for SafeString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafeString::On => write!(f, "on"),
            SafeString::Off => write!(f, "off"),
        }
    }
}

/// Output flags shared by the paginated listings
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Print only the number of matching items
    #[arg(short = 'C', long)]
    pub count: bool,

    /// Print attribute values only (implies --verbose unless --lines)
    #[arg(long)]
    pub values: bool,

    /// Print one JSON item per line
    #[arg(short = '1', long)]
    pub lines: bool,

    /// Print the full collection as one JSON document
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Pretty-print the JSON document
    #[arg(short = 'P', long)]
    pub pretty: bool,

    /// Request the simplified keyValues representation
    #[arg(short = 'k', long = "key-values")]
    pub key_values: bool,

    /// Request unique attribute values
    #[arg(long)]
    pub unique: bool,

    /// Request a GeoJSON FeatureCollection (NGSI-LD only)
    #[arg(long = "accept-geo-json", conflicts_with = "lines")]
    pub accept_geo_json: bool,
}

impl RenderArgs {
    /// Output mode selected by the flags
    pub fn mode(&self) -> RenderMode {
        RenderMode::from_flags(
            self.values,
            self.lines,
            self.verbose,
            self.pretty,
            self.accept_geo_json,
        )
    }
}
