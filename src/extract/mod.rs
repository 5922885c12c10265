// src/extract/mod.rs
//! # Extraction pipeline
//!
//! Turns captured text into [`NormalizedRecord`]s. Nothing in here returns an
//! error: malformed JSON, missing fields and unexpected shapes all degrade to
//! "fewer records", never to a failure.
//!
//! ## Stages
//! - `decode` – tagged queue strings (`<id>:<payload>`), tried literal first
//!   and then as an unescaped string literal.
//! - `records` – picks result lists out of a parsed fragment, with a bounded
//!   structural walk for the discriminator field as the fallback.
//! - `normalize` – maps the known raw shapes onto the canonical record.
//! - `scan` – direct scan of network bodies and inline scripts, for content
//!   that never went through the queue.
//!
//! ## Typical call chain
//! ```text
//! capture::PageEvent → agent::ContentAgent → extract::{process_flight, scan_body, scan_document}
//!                                          ↘ cache::RecordCache::upsert
//! ```

pub mod decode;
pub mod normalize;
pub mod records;
pub mod scan;

use crate::model::NormalizedRecord;

pub use decode::decode_tagged;
pub use normalize::normalize;
pub use records::{extract, walk_discriminated};
pub use scan::{scan_body, scan_document, scan_inline_script};

/// Decode one tagged queue string and normalize everything it carries.
pub fn process_flight(tag: &str) -> Vec<NormalizedRecord> {
    decode_tagged(tag).iter().map(normalize).collect()
}
