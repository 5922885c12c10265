// src/extract/decode.rs
use serde_json::Value;

use crate::core::locate::locate_array;
use crate::core::sanitize::quote_bare;
use crate::model::RawResultRecord;

use super::records::extract;

/// Decode a tagged queue string `<prefix>:<payload>` into raw records.
///
/// The same payload shows up either directly evaluable or pre-escaped as a
/// string literal, depending on the capture path. The literal form is tried
/// first; the unescaped form only when the literal one yields nothing.
pub fn decode_tagged(tag: &str) -> Vec<RawResultRecord> {
    let unescaped = unescape_literal(tag).filter(|u| !u.is_empty() && u != tag);

    let candidates = std::iter::once(tag).chain(unescaped.as_deref());
    for cand in candidates {
        let Some(arr) = parse_fragment(cand) else { continue };
        let out = extract(&arr);
        if !out.is_empty() {
            return out;
        }
    }
    Vec::new()
}

/// Read `s` as the inside of a JSON string literal.
pub fn unescape_literal(s: &str) -> Option<String> {
    let quoted = join!("\"", &quote_bare(s), "\"");
    serde_json::from_str::<String>(&quoted).ok()
}

/// Everything after the first `:`, parsed as an array: directly when it
/// starts with `[`, else (or on failure) via the first balanced array span.
fn parse_fragment(cand: &str) -> Option<Vec<Value>> {
    let after = match cand.find(':') {
        Some(i) => &cand[i + 1..],
        None => cand,
    }
    .trim();

    let direct = if after.starts_with('[') {
        serde_json::from_str::<Value>(after).ok()
    } else {
        None
    };
    let parsed = direct.or_else(|| {
        let span = locate_array(after)?;
        serde_json::from_str::<Value>(span).ok()
    })?;

    match parsed {
        Value::Array(items) => Some(items),
        _ => None,
    }
}
