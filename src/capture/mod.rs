// src/capture/mod.rs
//! Page-side capture surface.
//!
//! Both paths only *observe*: the queue keeps every push, the tap hands every
//! body byte to its original reader. What they see is posted to the content
//! agent as a [`PageEvent`] over an mpsc channel, the same way the page and the
//! extension layer only talk through messages.
//!
//! ```text
//! host page ── push ──▶ FlightQueue ──┐
//!           ── body ──▶ TapReader ────┼── PageEvent ──▶ agent::ContentAgent
//!           ── log  ──────────────────┘
//! ```

pub mod net;
pub mod queue;

use std::sync::mpsc::Sender;

use crate::model::RawCapture;

/// What the page side posts to the content agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEvent {
    /// Diagnostic line from the page context.
    Debug(String),
    Capture(RawCapture),
}

/// Fire-and-forget post; a dropped receiver is not an error for the page.
pub(crate) fn post(tx: &Sender<PageEvent>, ev: PageEvent) {
    let _ = tx.send(ev);
}

pub use net::{NetworkTap, TapReader};
pub use queue::{FlightQueue, QueueBinding, RewrapWindow};
