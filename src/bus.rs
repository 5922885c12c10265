// src/bus.rs
//! In-process message bus between the content agents (one per context), the
//! background coordinator and the viewer.
//!
//! Messages are JSON objects tagged by `type`, so the same values can cross a
//! real process boundary unchanged. Delivery failures are never fatal: logging
//! is fire-and-forget and request helpers hand back `None`.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::agent::ContentAgent;
use crate::coordinator::Coordinator;
use crate::model::NormalizedRecord;

/// Context (browser tab) identifier.
pub type TabId = u64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    #[serde(rename = "CSG_GET_DATA")]
    GetData,
    #[serde(rename = "CSG_FORCE_SCAN")]
    ForceScan,
    #[serde(rename = "CSG_LOG")]
    Log { line: String },
    #[serde(rename = "CSG_SAVE", rename_all = "camelCase")]
    Save {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tab_id: Option<TabId>,
        #[serde(default)]
        items: Vec<NormalizedRecord>,
    },
    #[serde(rename = "CSG_REFRESH_TAB")]
    RefreshTab,
    #[serde(rename = "CSG_VERIFY_DATA")]
    VerifyData { payload: Vec<NormalizedRecord> },
    #[serde(rename = "CSG_CACHE_UPDATED", rename_all = "camelCase")]
    CacheUpdated { tab_id: TabId, count: usize },
    #[serde(rename = "CSG_TAB_RELOADED", rename_all = "camelCase")]
    TabReloaded { tab_id: TabId },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    /// Background `CSG_GET_DATA`
    Items { items: Vec<NormalizedRecord> },
    Ack {
        ok: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Tagged reply, e.g. `CSG_VERIFY_DATA` from a content agent
    Message(Message),
}

impl Reply {
    pub fn ok() -> Self { Reply::Ack { ok: true, error: None } }

    pub fn fail(error: impl Into<String>) -> Self {
        Reply::Ack { ok: false, error: Some(error.into()) }
    }

    /// Records carried by either data-bearing reply.
    pub fn records(&self) -> Option<&[NormalizedRecord]> {
        match self {
            Reply::Items { items } => Some(items),
            Reply::Message(Message::VerifyData { payload }) => Some(payload),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusError {
    /// Nobody listens in the addressed context.
    NoReceiver(String),
    /// The receiver exists but had nothing to say.
    NoResponse,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::NoReceiver(who) => write!(f, "Could not establish connection. Receiving end does not exist ({who})"),
            BusError::NoResponse => write!(f, "The message port closed before a response was received"),
        }
    }
}

impl std::error::Error for BusError {}

/// Something that answers bus messages.
pub trait Endpoint {
    /// `from` is the sender's context, if it has one.
    fn handle(&mut self, from: Option<TabId>, msg: Message) -> Option<Reply>;
}

/// The extension runtime: one background coordinator, any number of tabs.
#[derive(Default)]
pub struct LocalBus {
    background: Coordinator,
    tabs: HashMap<TabId, ContentAgent>,
    notifications: VecDeque<Message>,
}

impl LocalBus {
    pub fn new(background: Coordinator) -> Self {
        Self { background, tabs: HashMap::new(), notifications: VecDeque::new() }
    }

    pub fn coordinator(&self) -> &Coordinator { &self.background }
    pub fn coordinator_mut(&mut self) -> &mut Coordinator { &mut self.background }

    /// Make `tab` the active one, attaching an empty agent if needed.
    pub fn focus(&mut self, tab: TabId) -> &mut ContentAgent {
        self.background.set_active(Some(tab));
        self.tabs.entry(tab).or_insert_with(|| ContentAgent::new(tab))
    }

    /// Request to the background coordinator.
    pub fn send_to_background(&mut self, from: Option<TabId>, msg: Message) -> Result<Reply, BusError> {
        let reloading = matches!(msg, Message::RefreshTab).then(|| self.background.active());
        let reply = self.background.handle(from, msg);
        self.notifications.extend(self.background.take_outbox());

        // The coordinator asked for a reload; the runtime performs it.
        if let (Some(Some(tab)), Some(Reply::Ack { ok: true, .. })) = (reloading, &reply) {
            self.reload_tab(tab);
        }
        reply.ok_or(BusError::NoResponse)
    }

    /// Request to the content agent of `tab`.
    pub fn send_to_tab(&mut self, tab: TabId, msg: Message) -> Result<Reply, BusError> {
        let agent = self
            .tabs
            .get_mut(&tab)
            .ok_or_else(|| BusError::NoReceiver(format!("tab {tab}")))?;
        agent.handle(None, msg).ok_or(BusError::NoResponse)
    }

    /// Push the tab's current snapshot to the background (`CSG_SAVE`).
    pub fn sync_tab(&mut self, tab: TabId) -> Result<Reply, BusError> {
        let save = self
            .tabs
            .get(&tab)
            .map(ContentAgent::save_message)
            .ok_or_else(|| BusError::NoReceiver(format!("tab {tab}")))?;
        self.send_to_background(Some(tab), save)
    }

    /// Reload: the tab's cache is cleared and its page scanned again.
    pub fn reload_tab(&mut self, tab: TabId) {
        if let Some(agent) = self.tabs.get_mut(&tab) {
            agent.reload();
        }
        let _ = self.sync_tab(tab);
        self.background.on_tab_complete(tab);
        self.notifications.extend(self.background.take_outbox());
    }

    /// Fire-and-forget diagnostic line.
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        logd!("{line}");
        self.notifications.push_back(Message::Log { line });
    }

    pub fn poll_notification(&mut self) -> Option<Message> {
        self.notifications.pop_front()
    }
}

/// Ask a tab for its records, as the viewer does. Failures come back as `None`.
pub fn ask(bus: &mut LocalBus, tab: TabId, msg: Message) -> Option<Vec<NormalizedRecord>> {
    let kind = serde_json::to_value(&msg)
        .ok()
        .and_then(|v| v.get("type").and_then(|t| t.as_str()).map(str::to_string))
        .unwrap_or_default();
    bus.log(format!("→ sendMessage {kind}"));

    match bus.send_to_tab(tab, msg) {
        Ok(reply) => {
            let items = reply.records().map(<[NormalizedRecord]>::to_vec);
            let count = items.as_ref().map(Vec::len).unwrap_or(0);
            bus.log(format!("← response {kind}: {count} items"));
            items
        }
        Err(e) => {
            bus.log(format!("✗ sendMessage error: {e}"));
            None
        }
    }
}
