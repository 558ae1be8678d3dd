//! Per-page rendering for the selected output mode

use serde_json::Value;
use std::io::Write;

use crate::error::{NgsiError, Result};
use crate::ngsi::Page;

use super::stream::{JsonArrayStream, GEOJSON_HEADER};
use super::{indent, sort_keys};

/// Output encoding chosen once per command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One `id` per line
    IdsOnly,
    /// One compact JSON tuple per line (`--values --lines`)
    ValueLines,
    /// One compact JSON record per line
    Lines,
    /// The whole collection as one JSON document
    Verbose { pretty: bool, geojson: bool },
}

impl RenderMode {
    /// Select the mode from command flags
    ///
    /// `lines` wins over the document modes; `values`, `pretty` and
    /// `geojson` each imply a full document.
    pub fn from_flags(values: bool, lines: bool, verbose: bool, pretty: bool, geojson: bool) -> Self {
        if lines {
            if values {
                RenderMode::ValueLines
            } else {
                RenderMode::Lines
            }
        } else if verbose || values || pretty || geojson {
            RenderMode::Verbose { pretty, geojson }
        } else {
            RenderMode::IdsOnly
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, RenderMode::Verbose { .. })
    }
}

/// Remove the FeatureCollection envelope, returning the features array
pub fn strip_feature_collection(body: &[u8]) -> Result<&[u8]> {
    let trimmed = body.trim_ascii();
    trimmed
        .strip_prefix(GEOJSON_HEADER)
        .and_then(|rest| rest.strip_suffix(b"}"))
        .map(<[u8]>::trim_ascii)
        .ok_or_else(|| {
            let head = String::from_utf8_lossy(&trimmed[..trimmed.len().min(48)]).into_owned();
            NgsiError::GeoJsonFraming(format!(
                "response is not a FeatureCollection envelope: {}",
                head
            ))
        })
}

#[derive(Clone, Copy)]
enum LineKind {
    Ids,
    Values,
    Records,
}

enum Target<W: Write> {
    Lines(W, LineKind),
    Document {
        stream: JsonArrayStream<W>,
        pretty: bool,
        geojson: bool,
    },
}

/// Routes each page to the rendering path of one [`RenderMode`]
pub struct PageRenderer<W: Write> {
    target: Target<W>,
}

impl<W: Write> PageRenderer<W> {
    pub fn new(sink: W, mode: RenderMode) -> Self {
        let target = match mode {
            RenderMode::IdsOnly => Target::Lines(sink, LineKind::Ids),
            RenderMode::ValueLines => Target::Lines(sink, LineKind::Values),
            RenderMode::Lines => Target::Lines(sink, LineKind::Records),
            RenderMode::Verbose { pretty, geojson } => Target::Document {
                stream: JsonArrayStream::open(sink, geojson, pretty),
                pretty,
                geojson,
            },
        };
        Self { target }
    }

    /// Render one page
    pub fn render(&mut self, page: &Page) -> Result<()> {
        self.render_body(&page.body)
    }

    /// Render one page body
    pub fn render_body(&mut self, body: &[u8]) -> Result<()> {
        match &mut self.target {
            Target::Lines(out, LineKind::Ids) => write_ids(out, body),
            Target::Lines(out, LineKind::Values) => write_value_lines(out, body),
            Target::Lines(out, LineKind::Records) => write_lines(out, body),
            Target::Document {
                stream,
                pretty,
                geojson,
            } => {
                let (pretty, geojson) = (*pretty, *geojson);
                let array = if geojson {
                    strip_feature_collection(body)?
                } else {
                    body
                };
                if pretty {
                    let prefix = if geojson { "  " } else { "" };
                    let indented = indent(array, prefix, "  ")?;
                    stream.write(Some(&indented))?;
                } else {
                    stream.write(Some(array))?;
                }
                Ok(())
            }
        }
    }

    /// Close the document (verbose mode) and flush
    pub fn finish(self) -> Result<()> {
        match self.target {
            Target::Lines(mut out, _) => out.flush()?,
            Target::Document { mut stream, .. } => stream.close()?,
        }
        Ok(())
    }
}

fn write_ids<W: Write>(out: &mut W, body: &[u8]) -> Result<()> {
    let records: Vec<Value> = serde_json::from_slice(body)?;
    for record in &records {
        match record.get("id") {
            Some(Value::String(id)) => writeln!(out, "{}", id)?,
            Some(other) => writeln!(out, "{}", other)?,
            None => writeln!(out)?,
        }
    }
    out.flush()?;
    Ok(())
}

fn write_value_lines<W: Write>(out: &mut W, body: &[u8]) -> Result<()> {
    let tuples: Vec<Vec<Value>> = serde_json::from_slice(body)?;
    for tuple in &tuples {
        writeln!(out, "{}", serde_json::to_string(tuple)?)?;
    }
    out.flush()?;
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, body: &[u8]) -> Result<()> {
    let records: Vec<Value> = serde_json::from_slice(body)?;
    for record in records {
        writeln!(out, "{}", serde_json::to_string(&sort_keys(record))?)?;
    }
    out.flush()?;
    Ok(())
}
