//! Output module
//!
//! Renders broker responses to an `io::Write` sink: per-page rendering for
//! listings and whole-body printing for single responses.

mod render;
mod stream;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::Write;

use crate::error::Result;

pub use render::{strip_feature_collection, PageRenderer, RenderMode};
pub use stream::{strip_brackets, Delimiter, JsonArrayStream, StreamState};

/// Re-indent a JSON document
///
/// Every line after the first is prefixed with `prefix`; nesting levels use
/// `indent`. Object key order is preserved.
pub fn indent(src: &[u8], prefix: &str, indent: &str) -> Result<Vec<u8>> {
    let value: Value = serde_json::from_slice(src)?;
    let mut pretty = Vec::with_capacity(src.len() * 2);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut pretty, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser)?;

    if prefix.is_empty() {
        return Ok(pretty);
    }
    let mut out = Vec::with_capacity(pretty.len());
    for &b in &pretty {
        out.push(b);
        if b == b'\n' {
            out.extend_from_slice(prefix.as_bytes());
        }
    }
    Ok(out)
}

/// Recursively order object keys alphabetically
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Print a single (non-paginated) response body followed by a newline
pub fn print_response<W: Write>(out: &mut W, body: &[u8], pretty: bool) -> Result<()> {
    if pretty && !body.trim_ascii().is_empty() {
        out.write_all(&indent(body, "", "  ")?)?;
    } else {
        out.write_all(body.trim_ascii_end())?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_without_prefix() {
        let out = indent(br#"[{"id":"a","n":[1,2]}]"#, "", "  ").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\n  {\n    \"id\": \"a\",\n    \"n\": [\n      1,\n      2\n    ]\n  }\n]"
        );
    }

    #[test]
    fn test_indent_with_prefix() {
        let out = indent(br#"[{"id":"a"}]"#, "  ", "  ").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\n    {\n      \"id\": \"a\"\n    }\n  ]"
        );
    }

    #[test]
    fn test_indent_keeps_key_order() {
        let out = indent(br#"{"z":1,"a":2}"#, "", "  ").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"z\": 1,\n  \"a\": 2\n}");
    }

    #[test]
    fn test_indent_invalid_json() {
        assert!(indent(b"[{", "", "  ").is_err());
    }

    #[test]
    fn test_sort_keys_nested() {
        let value: Value = serde_json::from_str(r#"{"b":{"y":1,"x":2},"a":[{"d":1,"c":2}]}"#).unwrap();
        let sorted = serde_json::to_string(&sort_keys(value)).unwrap();
        assert_eq!(sorted, r#"{"a":[{"c":2,"d":1}],"b":{"x":2,"y":1}}"#);
    }

    #[test]
    fn test_print_response_plain() {
        let mut out = Vec::new();
        print_response(&mut out, br#"{"level":"WARN"}"#, false).unwrap();
        assert_eq!(out, b"{\"level\":\"WARN\"}\n");
    }

    #[test]
    fn test_print_response_pretty() {
        let mut out = Vec::new();
        print_response(&mut out, br#"{"level":"WARN"}"#, true).unwrap();
        assert_eq!(out, b"{\n  \"level\": \"WARN\"\n}\n");
    }

    #[test]
    fn test_print_response_empty_body() {
        let mut out = Vec::new();
        print_response(&mut out, b"", true).unwrap();
        assert_eq!(out, b"\n");
    }
}
