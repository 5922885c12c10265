// src/extract/scan.rs
//! Direct scan of text that never went through the queue: network bodies,
//! and inline scripts already rendered at initial load.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::capture::net::mentions_discriminator;
use crate::core::html::InlineScripts;
use crate::model::{NormalizedRecord, RawResultRecord};

use super::{normalize, process_flight, records::walk_discriminated};

/// Brace-delimited block holding a string-valued discriminator, no nesting.
/// The bounded repeats count chars, so the window is the same for any script.
fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(
            r#"\{[^{}]{0,2000}"certificationStatus"\s*:\s*"[^"]+"[^{}]{0,4000}\}"#,
        )
        .size_limit(256 << 20)
        .build()
        .expect("block pattern compiles")
    })
}

/// `self.__next_f.push([<n>, "<escaped payload>"])` inside an inline script.
fn push_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"self\.__next_f\.push\(\[\s*\d+\s*,\s*"((?:[^"\\]|\\.)+)"\s*\]\)"#)
            .expect("push pattern compiles")
    })
}

/// Every standalone JSON object block that mentions the discriminator.
pub fn brace_blocks(text: &str) -> Vec<RawResultRecord> {
    block_re()
        .find_iter(text)
        .filter_map(|m| serde_json::from_str::<Value>(m.as_str()).ok())
        .collect()
}

/// Network body: whole-body JSON + structural walk, else brace blocks.
pub fn scan_body(text: &str) -> Vec<NormalizedRecord> {
    let mut raw = match serde_json::from_str::<Value>(text) {
        Ok(j) => walk_discriminated(&j),
        Err(_) => Vec::new(),
    };
    if raw.is_empty() {
        raw = brace_blocks(text);
    }
    raw.iter().map(normalize).collect()
}

/// One inline script: queue push literals first, then brace blocks.
pub fn scan_inline_script(text: &str) -> Vec<NormalizedRecord> {
    let mut found = Vec::new();

    for caps in push_re().captures_iter(text) {
        if let Some(payload) = caps.get(1) {
            found.extend(process_flight(payload.as_str()));
        }
    }

    if mentions_discriminator(text) {
        found.extend(brace_blocks(text).iter().map(normalize));
    }
    found
}

/// Every inline script of a document, in document order.
pub fn scan_document(html: &str) -> Vec<NormalizedRecord> {
    let mut found = Vec::new();
    for script in InlineScripts::new(html) {
        found.extend(scan_inline_script(script));
    }
    found
}
