// src/capture/net.rs
use std::io::{self, Read};
use std::sync::mpsc::Sender;

use crate::config::consts::{DISCRIMINATOR, NET_BODY_MAX_CHARS};
use crate::model::RawCapture;

use super::{post, PageEvent};

/// Forwards response bodies that mention the discriminator field.
#[derive(Clone, Debug)]
pub struct NetworkTap {
    tx: Sender<PageEvent>,
}

impl NetworkTap {
    pub fn new(tx: Sender<PageEvent>) -> Self { Self { tx } }

    /// Returns whether the body was forwarded.
    pub fn observe(&self, body: &str) -> bool {
        if !mentions_discriminator(body) { return false; }
        post(&self.tx, PageEvent::Capture(RawCapture::network(truncate_chars(body, NET_BODY_MAX_CHARS))));
        true
    }
}

/// `"certificationStatus"` either plain or inside an escaped string.
pub fn mentions_discriminator(text: &str) -> bool {
    let plain = format!("\"{DISCRIMINATOR}\"");
    let escaped = format!("\\\"{DISCRIMINATOR}\\\"");
    text.contains(&plain) || text.contains(&escaped)
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Read-through wrapper: the caller gets every byte unchanged, and the tap
/// sees the whole body once the inner reader hits EOF.
pub struct TapReader<R> {
    inner: R,
    tap: NetworkTap,
    seen: Vec<u8>,
    done: bool,
}

impl<R: Read> TapReader<R> {
    pub fn new(inner: R, tap: NetworkTap) -> Self {
        Self { inner, tap, seen: Vec::new(), done: false }
    }
}

impl<R: Read> Read for TapReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.seen.extend_from_slice(&buf[..n]);
        } else if !self.done && !buf.is_empty() {
            self.done = true;
            let body = String::from_utf8_lossy(&self.seen);
            self.tap.observe(&body);
            self.seen = Vec::new();
        }
        Ok(n)
    }
}
