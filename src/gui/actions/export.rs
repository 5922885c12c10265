// src/gui/actions/export.rs
use std::ffi::OsStr;

use crate::{
    config::options::ExportFormat,
    file::{self, find_nearest_existing_parent, open_with_system},
    gui::app::App,
};

pub fn export(app: &mut App, format: ExportFormat) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        app.out_path_dirty = false;
    }
    app.state.options.export.format = format;
    app.out_path_text = app.state.options.export.out_path().to_string_lossy().into_owned();

    if app.records.is_empty() {
        logd!("Export: Clicked, but there's nothing to export");
        app.status("Nothing to export");
        return;
    }

    logf!("Export: Begin format={:?} records={}", format, app.records.len());
    match file::write_export(&app.state.options.export, &app.records) {
        Ok(path) => app.status(format!("Exported {} item(s) → {}", app.records.len(), path.display())),
        Err(e) => {
            loge!("Export: Error: {}", e);
            app.status(format!("Export error: {e}"));
        }
    }
}

/// Open the output folder in the system file explorer.
pub fn open_output_folder(app: &App) {
    let path = app.state.options.export.out_path();
    let folder = find_nearest_existing_parent(path.parent().unwrap_or(path.as_path()));

    let absolute = match std::fs::canonicalize(&folder) {
        Ok(p) => p,
        Err(e) => {
            let msg = format!("Cannot resolve folder path: {}", e);
            loge!("{}", msg);
            app.status(msg);
            return;
        }
    };

    if let Err(e) = open_with_system(OsStr::new(&absolute)) {
        loge!("Failed to open folder: {}", e);
        app.status(format!("Failed to open folder: {}", e));
    } else {
        logf!("Opened folder: {}", absolute.display());
    }
}
