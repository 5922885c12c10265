// src/gui/components/toolbar.rs

use eframe::egui;
use crate::{
    config::options::ExportFormat,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    // --- Capture input ---
    ui.horizontal(|ui| {
        ui.label("Capture:");
        ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.capture_path)
                .hint_text("page.html / body.json / queue.flight / http://…")
                .font(egui::TextStyle::Monospace),
        );

        if ui.button("Scan").on_hover_text("Force a scan of the capture into the current context").clicked() {
            actions::scan(app);
        }

        let can_reload = app.current_tab().is_some();
        if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
            actions::reload(app);
        }
    });

    // --- Output ---
    let mut open_folder_clicked = false;
    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;
        let prev = export.format;
        ui.label("Format:");
        ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
        ui.selectable_value(&mut export.format, ExportFormat::Json, "JSON");
        if export.format != prev {
            logf!("UI: Export format → {:?}", export.format);
            if !app.out_path_dirty {
                app.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }

        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text).font(egui::TextStyle::Monospace))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }

        if ui.button("📁").on_hover_text("Open output folder").clicked() {
            open_folder_clicked = true;
        }
    });

    if open_folder_clicked {
        actions::open_output_folder(app);
    }

    // --- Actions ---
    ui.horizontal(|ui| {
        if ui.button("Copy").clicked() {
            actions::copy(app, ui.ctx());
        }
        if ui.button("Export CSV").clicked() {
            actions::export(app, ExportFormat::Csv);
        }
        if ui.button("Export JSON").clicked() {
            actions::export(app, ExportFormat::Json);
        }

        ui.label(app.status_text());
    });
}
