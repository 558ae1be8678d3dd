//! Streaming re-assembly of paginated JSON arrays
//!
//! Each page contributes one fragment (a JSON array with its brackets
//! stripped). Emission lags one fragment behind, so a delimiter is only
//! written once another fragment proves the previous one was not the last.

use std::io::{self, Write};

pub(crate) const GEOJSON_HEADER: &[u8] = br#"{"type":"FeatureCollection","features":"#;
const GEOJSON_HEADER_PRETTY: &[u8] = b"{\n  \"type\": \"FeatureCollection\",\n  \"features\": ";

/// Token written before the next flushed fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Nothing emitted yet
    #[default]
    Open,
    /// At least one fragment emitted
    Comma,
}

impl Delimiter {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            Delimiter::Open => b"[",
            Delimiter::Comma => b",",
        }
    }
}

/// Buffering state owned by one stream
#[derive(Debug, Default)]
pub struct StreamState {
    pending: Option<Vec<u8>>,
    delimiter: Delimiter,
}

impl StreamState {
    pub fn pending(&self) -> Option<&[u8]> {
        self.pending.as_deref()
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }
}

/// Strip surrounding whitespace and the outer brackets of an array
///
/// Input that is not bracketed passes through unchanged.
pub fn strip_brackets(fragment: &[u8]) -> &[u8] {
    let trimmed = fragment.trim_ascii();
    match trimmed {
        [b'[', inner @ .., b']'] => inner,
        _ => trimmed,
    }
}

/// Writes fragments as one JSON array (or GeoJSON FeatureCollection)
pub struct JsonArrayStream<W: Write> {
    sink: W,
    geojson: bool,
    pretty: bool,
    state: Option<StreamState>,
}

impl<W: Write> JsonArrayStream<W> {
    /// Start a new document on `sink`
    pub fn open(sink: W, geojson: bool, pretty: bool) -> Self {
        Self {
            sink,
            geojson,
            pretty,
            state: Some(StreamState::default()),
        }
    }

    /// Current buffering state, `None` once closed
    pub fn state(&self) -> Option<&StreamState> {
        self.state.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Flush the pending fragment and buffer the new one
    ///
    /// `None` (or an empty array) only flushes.
    pub fn write(&mut self, fragment: Option<&[u8]>) -> io::Result<()> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };

        if let Some(pending) = state.pending.take() {
            if state.delimiter == Delimiter::Open && self.geojson {
                let header = if self.pretty {
                    GEOJSON_HEADER_PRETTY
                } else {
                    GEOJSON_HEADER
                };
                self.sink.write_all(header)?;
            }
            self.sink.write_all(state.delimiter.as_bytes())?;
            self.sink.write_all(&pending)?;
            self.sink.flush()?;
            state.delimiter = Delimiter::Comma;
        }

        state.pending = fragment
            .map(strip_brackets)
            .filter(|inner| !inner.trim_ascii().is_empty())
            .map(<[u8]>::to_vec);
        Ok(())
    }

    /// Flush what is buffered and terminate the document
    ///
    /// Emits nothing at all if no fragment was ever written.
    pub fn close(&mut self) -> io::Result<()> {
        if self.state.as_ref().is_some_and(|s| s.pending.is_some()) {
            self.write(None)?;
        }
        let Some(state) = self.state.take() else {
            return Ok(());
        };

        if state.delimiter == Delimiter::Comma {
            self.sink.write_all(b"]")?;
            if self.geojson {
                let footer: &[u8] = if self.pretty { b"\n}" } else { b"}" };
                self.sink.write_all(footer)?;
            }
        }
        self.sink.flush()
    }
}

impl<W: Write> Drop for JsonArrayStream<W> {
    fn drop(&mut self) {
        if self.state.is_some() {
            let _ = self.close();
        }
    }
}
