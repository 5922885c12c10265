// src/capture/queue.rs
//! Interception of the page's streaming-update queue.
//!
//! The host page owns a global array (`self.__next_f`) and may replace it at
//! any time during its own start-up. [`QueueBinding`] stands in for that
//! global: every assignment through it is re-wrapped, and for a bounded
//! window after install `poll` re-wraps whatever the slot holds, which covers
//! replacements that bypassed the setter (`raw_slot`).

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::consts::{QUEUE_GLOBAL, REWRAP_POLL_MS, REWRAP_WINDOW_MS};
use crate::model::RawCapture;

use super::{post, PageEvent};

/// The page's queue array plus an optional forwarding hook.
#[derive(Debug, Default)]
pub struct FlightQueue {
    entries: Vec<Value>,
    hook: Option<Sender<PageEvent>>,
}

impl FlightQueue {
    pub fn new() -> Self { Self::default() }

    pub fn from_entries(entries: Vec<Value>) -> Self {
        Self { entries, hook: None }
    }

    /// Array-valued assignments keep their contents; anything else becomes empty.
    pub fn from_value(v: Value) -> Self {
        match v {
            Value::Array(entries) => Self::from_entries(entries),
            _ => Self::new(),
        }
    }

    /// Push as the page would. A `[id, "<tag>:<payload>"]` entry is forwarded
    /// before it is appended; the append itself is never skipped.
    pub fn push(&mut self, entry: Value) {
        if let (Some(tx), Some(payload)) = (&self.hook, tagged_payload(&entry)) {
            post(tx, PageEvent::Capture(RawCapture::queue(payload)));
        }
        self.entries.push(entry);
    }

    pub fn is_wrapped(&self) -> bool { self.hook.is_some() }
    pub fn entries(&self) -> &[Value] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Install the hook once. Entries pushed before wrapping are not replayed;
    /// the inline scan covers those.
    fn wrap(&mut self, tx: &Sender<PageEvent>) -> bool {
        if self.hook.is_some() { return false; }
        self.hook = Some(tx.clone());
        post(tx, PageEvent::Debug(s!("flight queue wrapped")));
        true
    }
}

/// Second element of a two-element-ish array entry, if it is a string.
fn tagged_payload(entry: &Value) -> Option<&str> {
    entry.as_array()?.get(1)?.as_str()
}

/// Fixed-cadence re-check that stops on its own.
#[derive(Clone, Copy, Debug)]
pub struct RewrapWindow {
    deadline: Instant,
    every: Duration,
    next_due: Instant,
}

impl RewrapWindow {
    pub fn new(start: Instant, every: Duration, window: Duration) -> Self {
        Self { deadline: start + window, every, next_due: start + every }
    }

    pub fn standard(start: Instant) -> Self {
        Self::new(
            start,
            Duration::from_millis(REWRAP_POLL_MS),
            Duration::from_millis(REWRAP_WINDOW_MS),
        )
    }

    pub fn expired(&self, now: Instant) -> bool { now >= self.deadline }

    /// True once per elapsed tick while the window is open.
    fn due(&mut self, now: Instant) -> bool {
        if self.expired(now) || now < self.next_due { return false; }
        while self.next_due <= now { self.next_due += self.every; }
        true
    }
}

/// Stand-in for the mutable global that holds the queue.
#[derive(Debug)]
pub struct QueueBinding {
    slot: Option<FlightQueue>,
    tx: Sender<PageEvent>,
    window: RewrapWindow,
}

impl QueueBinding {
    /// Wrap whatever the global holds now, or create an empty queue if unset.
    pub fn install(existing: Option<FlightQueue>, tx: Sender<PageEvent>, now: Instant) -> Self {
        Self::with_window(existing, tx, RewrapWindow::standard(now))
    }

    pub fn with_window(existing: Option<FlightQueue>, tx: Sender<PageEvent>, window: RewrapWindow) -> Self {
        let mut queue = existing.unwrap_or_default();
        queue.wrap(&tx);
        post(&tx, PageEvent::Debug(format!("{QUEUE_GLOBAL} guarded")));
        Self { slot: Some(queue), tx, window }
    }

    /// Guarded setter: every assigned queue is wrapped before it is stored.
    pub fn assign(&mut self, v: Value) {
        let mut queue = FlightQueue::from_value(v);
        queue.wrap(&self.tx);
        self.slot = Some(queue);
    }

    /// Direct access that bypasses the setter, like a host page that managed
    /// to redefine the global. Only `poll` catches these replacements.
    pub fn raw_slot(&mut self) -> &mut Option<FlightQueue> { &mut self.slot }

    pub fn queue(&self) -> Option<&FlightQueue> { self.slot.as_ref() }

    /// Push through the global, as `self.__next_f.push(entry)`.
    pub fn push(&mut self, entry: Value) {
        self.slot.get_or_insert_with(FlightQueue::new).push(entry);
    }

    /// Periodic re-check. Returns false once the window has closed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.window.expired(now) { return false; }
        if self.window.due(now) {
            if let Some(q) = self.slot.as_mut() {
                if q.wrap(&self.tx) {
                    logd!("Capture: re-wrapped replaced queue");
                }
            }
        }
        true
    }
}
