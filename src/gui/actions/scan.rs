// src/gui/actions/scan.rs
use crate::{
    bus::{ask, Message, Reply},
    config::options::{CaptureInput, CaptureOptions},
    gui::{app::App, progress::GuiProgress},
    runner::run_capture,
};

/// Feed the toolbar's capture file to the current context, force a scan,
/// then `CSG_SAVE` the snapshot to the coordinator.
pub fn scan(app: &mut App) {
    let path = app.state.gui.capture_path.trim().to_string();
    if path.is_empty() {
        app.status("Pick a capture file first");
        return;
    }

    let tab = app.current_tab().unwrap_or_else(|| {
        app.bus.coordinator().context_ids().last().map(|t| t + 1).unwrap_or(0)
    });
    let opts = CaptureOptions { tab_id: tab, inputs: vec![CaptureInput::guess(&path)], save: true };

    logf!("Scan: Begin tab={} input={:?}", tab, opts.inputs[0].kind);
    let mut prog = GuiProgress::new(app.status.clone());
    let res = run_capture(&opts, app.bus.focus(tab), Some(&mut prog));

    match res {
        Ok(n) => {
            let seen = ask(&mut app.bus, tab, Message::ForceScan).map(|v| v.len()).unwrap_or(0);
            if let Err(e) = app.bus.sync_tab(tab) {
                loge!("Scan: SAVE failed: {e}");
            }
            logf!("Scan: OK tab={} cached={} served={}", tab, n, seen);
            app.select_context(tab);
        }
        Err(e) => {
            loge!("Scan: Error tab={}: {}", tab, e);
            app.status(format!("Error: {e}"));
        }
    }
}

/// `CSG_REFRESH_TAB` for the active context.
pub fn reload(app: &mut App) {
    match app.bus.send_to_background(None, Message::RefreshTab) {
        Ok(Reply::Ack { ok: true, .. }) => {
            logf!("Reload: requested for {:?}", app.current_tab());
            app.status("Reloading…");
        }
        Ok(Reply::Ack { error, .. }) => {
            let e = error.unwrap_or_default();
            loge!("Reload: refused: {e}");
            app.status(format!("Reload failed: {e}"));
        }
        Ok(_) => {}
        Err(e) => {
            loge!("Reload: {e}");
            app.status(format!("Reload failed: {e}"));
        }
    }
}
