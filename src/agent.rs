// src/agent.rs
//! Content-layer agent: one per browsing context.
//!
//! Owns the context's record cache, receives what the page-side capture
//! surface posts, scans the document on load and on every mutation, and
//! serves snapshots on request.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use crate::bus::{Endpoint, Message, Reply, TabId};
use crate::cache::RecordCache;
use crate::core::html::inline_scripts;
use crate::capture::{FlightQueue, NetworkTap, PageEvent, QueueBinding};
use crate::extract::{process_flight, scan_body, scan_document, scan_inline_script};
use crate::model::{CaptureKind, NormalizedRecord, RawCapture};

pub struct ContentAgent {
    tab_id: TabId,
    cache: RecordCache,
    tx: Sender<PageEvent>,
    rx: Receiver<PageEvent>,
    /// Last document seen, for force scans and reloads
    document: Option<String>,
}

impl ContentAgent {
    pub fn new(tab_id: TabId) -> Self {
        let (tx, rx) = mpsc::channel();
        logf!("content agent started for tab {tab_id}");
        Self { tab_id, cache: RecordCache::new(), tx, rx, document: None }
    }

    pub fn cache(&self) -> &RecordCache { &self.cache }
    pub fn snapshot(&self) -> Vec<NormalizedRecord> { self.cache.snapshot() }

    /* ---------- page-side hookup ---------- */

    pub fn network_tap(&self) -> NetworkTap { NetworkTap::new(self.tx.clone()) }

    /// Hook the page's queue global (existing value, if any).
    pub fn install_queue(&self, existing: Option<FlightQueue>, now: Instant) -> QueueBinding {
        QueueBinding::install(existing, self.tx.clone(), now)
    }

    /* ---------- capture handling ---------- */

    /// Drain everything the page has posted so far. Returns records extracted.
    pub fn pump(&mut self) -> usize {
        let pending: Vec<PageEvent> = self.rx.try_iter().collect();
        pending.into_iter().map(|ev| self.handle_event(ev)).sum()
    }

    pub fn handle_event(&mut self, ev: PageEvent) -> usize {
        match ev {
            PageEvent::Debug(line) => {
                logd!("[inpage] {line}");
                0
            }
            PageEvent::Capture(capture) => self.ingest(capture),
        }
    }

    /// Run one capture through the pipeline and cache the result.
    pub fn ingest(&mut self, capture: RawCapture) -> usize {
        let (label, items) = match capture.kind {
            CaptureKind::QueueFragment => ("FLIGHT", process_flight(&capture.text)),
            CaptureKind::NetworkBody => ("NET_BODY", scan_body(&capture.text)),
            CaptureKind::InlineScript => ("INLINE", scan_inline_script(&capture.text)),
        };
        logd!("{label} parsed items: {}", items.len());
        self.upsert(items)
    }

    /// Initial scan of a freshly loaded document.
    pub fn load_document(&mut self, html: impl Into<String>) -> usize {
        let html = html.into();
        let n = self.upsert(scan_document(&html));
        if n == 0 {
            logd!("No items from inline/HTML on init");
        }
        self.document = Some(html);
        n
    }

    /// Any subtree mutation: rescan every inline script. Idempotent.
    pub fn on_mutation(&mut self, html: impl Into<String>) -> usize {
        let html = html.into();
        let n = inline_scripts(&html)
            .into_iter()
            .map(|script| self.ingest(RawCapture::inline(script)))
            .sum();
        self.document = Some(html);
        n
    }

    /// Context reload: cache cleared wholesale, document scanned again.
    pub fn reload(&mut self) {
        self.cache.clear();
        // captures still queued belong to the old page
        let _ = self.rx.try_iter().count();
        if let Some(html) = self.document.take() {
            self.load_document(html);
        }
        logf!("tab {} reloaded ({} items)", self.tab_id, self.cache.len());
    }

    fn upsert(&mut self, items: Vec<NormalizedRecord>) -> usize {
        let n = items.len();
        if n > 0 {
            self.cache.upsert(items);
        }
        n
    }

    /// `CSG_SAVE` carrying this context's snapshot.
    pub fn save_message(&self) -> Message {
        Message::Save { tab_id: Some(self.tab_id), items: self.snapshot() }
    }
}

impl Endpoint for ContentAgent {
    fn handle(&mut self, _from: Option<TabId>, msg: Message) -> Option<Reply> {
        match msg {
            Message::GetData | Message::ForceScan => {
                self.pump();
                if matches!(msg, Message::ForceScan) {
                    if let Some(html) = self.document.take() {
                        self.on_mutation(html);
                    }
                }
                let payload = self.snapshot();
                logd!("serve {:?}: {} items", msg, payload.len());
                Some(Reply::Message(Message::VerifyData { payload }))
            }
            _ => None,
        }
    }
}
