// src/gui/components/log_panel.rs
//
// Collapsible live log. Lines come from the shared log ring, which also
// receives every `CSG_LOG` line.

use eframe::egui::{self, TextStyle};
use crate::gui::app::App;
use crate::log::recent_lines;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let label = if app.state.gui.log_open { "Hide live log" } else { "Show live log" };
    if ui.button(label).clicked() {
        app.state.gui.log_open = !app.state.gui.log_open;
        logd!("UI: live log open → {}", app.state.gui.log_open);
    }
    if !app.state.gui.log_open {
        return;
    }

    let lines = recent_lines();
    egui::ScrollArea::vertical()
        .id_salt("live_log_scroll")
        .max_height(180.0)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in &lines {
                ui.label(egui::RichText::new(line).text_style(TextStyle::Monospace));
            }
        });
}
