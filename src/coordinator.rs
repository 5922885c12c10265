// src/coordinator.rs
//! Background coordinator: keeps the latest saved snapshot per context and
//! tells viewers when something changed.

use std::collections::{BTreeMap, HashSet};

use crate::bus::{Endpoint, Message, Reply, TabId};
use crate::model::NormalizedRecord;
use crate::store::Store;

#[derive(Default)]
pub struct Coordinator {
    contexts: BTreeMap<TabId, Vec<NormalizedRecord>>,
    active: Option<TabId>,
    reloading: HashSet<TabId>,
    store: Option<Store>,
    outbox: Vec<Message>,
}

impl Coordinator {
    pub fn new() -> Self { Self::default() }

    /// Persist saved contexts to disk and start from what is already there.
    pub fn with_store(store: Store) -> Self {
        let contexts = store.load_all();
        logf!("[sw] loaded {} stored context(s)", contexts.len());
        Self { contexts, store: Some(store), ..Self::default() }
    }

    pub fn set_active(&mut self, tab: Option<TabId>) { self.active = tab; }
    pub fn active(&self) -> Option<TabId> { self.active }

    pub fn context_ids(&self) -> Vec<TabId> { self.contexts.keys().copied().collect() }

    pub fn items(&self, tab: TabId) -> &[NormalizedRecord] {
        self.contexts.get(&tab).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Forget a context entirely (memory and disk).
    pub fn forget(&mut self, tab: TabId) {
        self.contexts.remove(&tab);
        if let Some(store) = &self.store {
            if let Err(e) = store.remove_context(tab) {
                loge!("[sw] could not remove stored tab {tab}: {e}");
            }
        }
    }

    /// Page finished loading. Completes a pending reload, if any.
    pub fn on_tab_complete(&mut self, tab: TabId) {
        if self.reloading.remove(&tab) {
            logf!("[sw] tab {tab} load complete");
            self.outbox.push(Message::TabReloaded { tab_id: tab });
        }
    }

    /// Notifications produced since the last call.
    pub fn take_outbox(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }

    fn save(&mut self, tab: TabId, items: Vec<NormalizedRecord>) {
        let count = items.len();
        if let Some(store) = &self.store {
            if let Err(e) = store.save_context(tab, &items) {
                loge!("[sw] could not persist tab {tab}: {e}");
            }
        }
        self.contexts.insert(tab, items);
        logf!("[sw] cache updated for tab {tab}: {count} items");
        self.outbox.push(Message::CacheUpdated { tab_id: tab, count });
    }
}

impl Endpoint for Coordinator {
    fn handle(&mut self, from: Option<TabId>, msg: Message) -> Option<Reply> {
        match msg {
            Message::Save { tab_id, items } => {
                // sender's context wins over the one named in the message
                let Some(tab) = from.or(tab_id) else {
                    return Some(Reply::fail("no-tab"));
                };
                self.save(tab, items);
                Some(Reply::ok())
            }
            Message::GetData => {
                let items = self.active.map(|t| self.items(t).to_vec()).unwrap_or_default();
                logd!("[sw] GET_DATA for tab {:?}: {} items", self.active, items.len());
                Some(Reply::Items { items })
            }
            Message::RefreshTab => {
                let Some(tab) = self.active else {
                    return Some(Reply::fail("no-active-tab"));
                };
                self.forget(tab);
                self.reloading.insert(tab);
                logf!("[sw] reload tab {tab}");
                Some(Reply::ok())
            }
            Message::Log { line } => {
                logd!("{line}");
                None
            }
            _ => None,
        }
    }
}
