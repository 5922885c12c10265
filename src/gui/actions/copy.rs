// src/gui/actions/copy.rs
use eframe::egui;

use crate::{file, gui::app::App};

/// Copy the shown records to the clipboard in the selected export format.
pub fn copy(app: &mut App, ctx: &egui::Context) {
    if app.records.is_empty() {
        logd!("Copy: Clicked, but there's nothing to copy");
        app.status("Nothing to copy");
        return;
    }

    let format = app.state.options.export.format;
    match file::render(format, &app.records) {
        Ok(text) => {
            logf!("Copy: format={:?} records={}", format, app.records.len());
            ctx.copy_text(text);
            app.status("Copied to clipboard");
        }
        Err(e) => {
            loge!("Copy: Error: {}", e);
            app.status(format!("Copy error: {e}"));
        }
    }
}
