//! Safe-string codec for the broker's forbidden characters
//!
//! Orion rejects `"'();<=>` inside attribute values, so clients store them
//! percent-encoded. Decoding restores them in every JSON string (keys and
//! values) of a response body; [`encode`] is its inverse for single values.

use serde_json::Value;

use crate::error::{NgsiError, Result};

/// Characters escaped by [`encode`], `%` is handled first
const FORBIDDEN: &[(char, &str)] = &[
    ('"', "%22"),
    ('\'', "%27"),
    ('(', "%28"),
    (')', "%29"),
    (';', "%3B"),
    ('<', "%3C"),
    ('=', "%3D"),
    ('>', "%3E"),
];

/// Percent-encode forbidden characters
pub fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '%' {
            out.push_str("%25");
        } else if let Some((_, escaped)) = FORBIDDEN.iter().find(|(f, _)| *f == c) {
            out.push_str(escaped);
        } else {
            out.push(c);
        }
    }
    out
}

fn decode_escape(hi: u8, lo: u8) -> Option<char> {
    match (hi, lo.to_ascii_uppercase()) {
        (b'2', b'2') => Some('"'),
        (b'2', b'5') => Some('%'),
        (b'2', b'7') => Some('\''),
        (b'2', b'8') => Some('('),
        (b'2', b'9') => Some(')'),
        (b'3', b'B') => Some(';'),
        (b'3', b'C') => Some('<'),
        (b'3', b'D') => Some('='),
        (b'3', b'E') => Some('>'),
        _ => None,
    }
}

/// Restore forbidden characters; unknown escapes are left untouched
pub fn decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(c) = decode_escape(bytes[i + 1], bytes[i + 2]) {
                out.push_str(&s[start..i]);
                out.push(c);
                i += 3;
                start = i;
                continue;
            }
        }
        i += 1;
    }
    out.push_str(&s[start..]);
    out
}

fn map_strings(value: Value, f: fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(|v| map_strings(v, f)).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (f(&k), map_strings(v, f)))
                .collect(),
        ),
        other => other,
    }
}

fn looks_like_json(data: &[u8]) -> bool {
    matches!(
        data.iter().find(|b| !b.is_ascii_whitespace()),
        Some(b'{') | Some(b'[')
    )
}

fn transform_json(data: &[u8], f: fn(&str) -> String) -> Result<Vec<u8>> {
    if !looks_like_json(data) {
        let text = std::str::from_utf8(data)
            .map_err(|e| NgsiError::Decode(format!("safe string: {}", e)))?;
        return Ok(f(text).into_bytes());
    }
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| NgsiError::Decode(format!("safe string: {}", e)))?;
    Ok(serde_json::to_vec(&map_strings(value, f))?)
}

/// Decode every JSON string in a response body
pub fn decode_json(data: &[u8]) -> Result<Vec<u8>> {
    transform_json(data, decode)
}
