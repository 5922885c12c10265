// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use eframe::egui;

use crate::{
    bus::{LocalBus, Message, Reply, TabId},
    config::{
        consts::{PAYWALL_POLL_SECS, PAYWALL_POLL_TRIES},
        state::AppState,
    },
    coordinator::Coordinator,
    entitlement::{Entitlement, LicenseFile},
    model::NormalizedRecord,
    store::Store,
};

use super::components;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "CodeSignal Results",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default(), Box::new(LicenseFile::default()))))),
    )?;
    Ok(())
}

/// Where the paywall stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Unlocked,
    /// Waiting on the provider; `tries` polls done so far.
    Polling { tries: u32, next: Instant },
    /// Gave up polling; buttons restart it.
    Locked,
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    pub bus: LocalBus,
    pub entitlement: Box<dyn Entitlement>,
    pub gate: Gate,

    // records of the context on screen
    pub records: Vec<NormalizedRecord>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // status line (progress sinks write here)
    pub status: Arc<Mutex<String>>,
}

impl App {
    pub fn new(state: AppState, entitlement: Box<dyn Entitlement>) -> Self {
        let bus = LocalBus::new(Coordinator::with_store(Store::default()));
        let out_path_text = state.options.export.out_path().to_string_lossy().into();

        let mut app = Self {
            state,
            bus,
            entitlement,
            gate: Gate::Locked,
            records: Vec::new(),
            out_path_text,
            out_path_dirty: false,
            status: Arc::new(Mutex::new(s!("Idle"))),
        };

        if app.check_user() {
            app.unlock();
        } else {
            logf!("Init: locked, showing paywall");
        }
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    #[inline]
    pub fn current_tab(&self) -> Option<TabId> { self.state.gui.current_tab }

    pub fn selected_record(&self) -> Option<&NormalizedRecord> {
        self.state.gui.selected_row.and_then(|i| self.records.get(i))
    }

    /* ---------- entitlement ---------- */

    fn check_user(&mut self) -> bool {
        self.entitlement.get_user().is_some_and(|u| u.is_unlocked())
    }

    /// Start (or restart) polling the provider.
    pub fn start_polling(&mut self) {
        self.gate = Gate::Polling { tries: 0, next: Instant::now() + Duration::from_secs(PAYWALL_POLL_SECS) };
    }

    fn unlock(&mut self) {
        self.gate = Gate::Unlocked;
        logf!("Init: unlocked, {} stored context(s)", self.bus.coordinator().context_ids().len());
        if let Some(&tab) = self.bus.coordinator().context_ids().first() {
            self.select_context(tab);
        }
    }

    fn poll_entitlement(&mut self, ctx: &egui::Context) {
        let Gate::Polling { tries, next } = self.gate else { return };
        let now = Instant::now();
        if now < next {
            ctx.request_repaint_after(next - now);
            return;
        }
        if self.check_user() {
            logf!("Paywall: unlocked after {} poll(s)", tries + 1);
            self.unlock();
        } else if tries + 1 >= PAYWALL_POLL_TRIES {
            logd!("Paywall: gave up polling");
            self.gate = Gate::Locked;
        } else {
            self.gate = Gate::Polling { tries: tries + 1, next: now + Duration::from_secs(PAYWALL_POLL_SECS) };
            ctx.request_repaint_after(Duration::from_secs(PAYWALL_POLL_SECS));
        }
    }

    /* ---------- data ---------- */

    /// Show a context: make it active and fetch its items from the coordinator.
    pub fn select_context(&mut self, tab: TabId) {
        self.state.gui.current_tab = Some(tab);
        self.state.gui.selected_row = None;
        self.bus.coordinator_mut().set_active(Some(tab));
        self.refresh_records();
        logf!("UI: context {tab} → {} record(s)", self.records.len());
    }

    /// Re-read the active context (`CSG_GET_DATA` to the background).
    pub fn refresh_records(&mut self) {
        self.records = match self.bus.send_to_background(None, Message::GetData) {
            Ok(Reply::Items { items }) => items,
            Ok(_) => Vec::new(),
            Err(e) => {
                loge!("GET_DATA failed: {e}");
                Vec::new()
            }
        };
        if self.state.gui.selected_row.is_some_and(|i| i >= self.records.len()) {
            self.state.gui.selected_row = None;
        }
        self.status(format!("{} item(s)", self.records.len()));
    }

    /// React to coordinator notifications.
    fn drain_notifications(&mut self) {
        while let Some(msg) = self.bus.poll_notification() {
            match msg {
                Message::CacheUpdated { tab_id, count } => {
                    logd!("UI: cache updated tab {tab_id} ({count})");
                    if self.current_tab() == Some(tab_id) {
                        self.refresh_records();
                    }
                }
                Message::TabReloaded { tab_id } => {
                    if self.current_tab() == Some(tab_id) {
                        self.refresh_records();
                        self.status(format!("Reloaded: {} item(s)", self.records.len()));
                    }
                }
                _ => {}
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.gate != Gate::Unlocked {
            self.poll_entitlement(ctx);
        }
        if self.gate != Gate::Unlocked {
            egui::CentralPanel::default().show(ctx, |ui| {
                components::paywall::draw(ui, self);
            });
            return;
        }

        self.drain_notifications();

        egui::SidePanel::left("contexts")
            .resizable(false)
            .show(ctx, |ui| {
                components::context_panel::draw(ui, self);
            });

        egui::TopBottomPanel::bottom("live_log")
            .resizable(true)
            .show(ctx, |ui| {
                components::log_panel::draw(ui, self);
            });

        if self.selected_record().is_some() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| {
                    components::details::draw(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            components::toolbar::draw(ui, self);

            ui.separator();

            components::data_table::draw(ui, self);
        });
    }
}
