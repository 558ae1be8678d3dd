//! List command resource definitions and arguments

use clap::{Parser, Subcommand};

use super::common::RenderArgs;
use crate::ngsi::RequestSpec;

/// Resource types for the 'list' command
#[derive(Subcommand, Debug)]
pub enum ListResource {
    /// List entities
    #[command(visible_alias = "entity", visible_alias = "ent")]
    Entities(EntitiesArgs),

    /// List context source registrations
    #[command(visible_alias = "registration", visible_alias = "reg")]
    Registrations(RegistrationsArgs),
}

/// Entity filter flags
#[derive(Parser, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Entity id
    #[arg(short = 'i', long)]
    pub id: Option<String>,

    /// Entity type
    #[arg(short = 't', long = "type")]
    pub entity_type: Option<String>,

    /// Regular expression matching entity ids
    #[arg(short = 'I', long = "id-pattern")]
    pub id_pattern: Option<String>,

    /// Regular expression matching entity types (NGSIv2 only)
    #[arg(long = "type-pattern")]
    pub type_pattern: Option<String>,

    /// Filter query expression (q)
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Metadata filter query (NGSIv2 only)
    #[arg(long)]
    pub mq: Option<String>,

    /// Geospatial relationship
    #[arg(long)]
    pub georel: Option<String>,

    /// Geometry of the geospatial query
    #[arg(long)]
    pub geometry: Option<String>,

    /// Coordinates of the geospatial query
    #[arg(long)]
    pub coords: Option<String>,

    /// Comma-separated attribute names to include
    #[arg(long)]
    pub attrs: Option<String>,

    /// Comma-separated metadata names to include (NGSIv2 only)
    #[arg(long)]
    pub metadata: Option<String>,

    /// Ordering criteria
    #[arg(long = "order-by")]
    pub order_by: Option<String>,
}

impl FilterArgs {
    /// Build the request description for these filters and output flags
    pub fn to_spec(&self, render: &RenderArgs) -> RequestSpec {
        RequestSpec {
            id: self.id.clone(),
            entity_type: self.entity_type.clone(),
            id_pattern: self.id_pattern.clone(),
            type_pattern: self.type_pattern.clone(),
            query: self.query.clone(),
            mq: self.mq.clone(),
            georel: self.georel.clone(),
            geometry: self.geometry.clone(),
            coords: self.coords.clone(),
            attrs: self.attrs.clone(),
            metadata: self.metadata.clone(),
            order_by: self.order_by.clone(),
            key_values: render.key_values,
            values: render.values,
            unique: render.unique,
            ..Default::default()
        }
    }
}

/// Arguments for 'list entities' subcommand
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        ngsictl list entities --type Room\n  \
        ngsictl list entities --type Room --verbose --pretty\n  \
        ngsictl --ngsi-type ld list entities --accept-geo-json\n  \
        ngsictl list entities --count")]
pub struct EntitiesArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Arguments for 'list registrations' subcommand
#[derive(Parser, Debug)]
pub struct RegistrationsArgs {
    #[command(flatten)]
    pub render: RenderArgs,
}
