// src/gui/components/context_panel.rs
//
// Left list of stored contexts. Clicking one makes it active and loads it.

use eframe::egui;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Contexts");
    ui.separator();

    let ids = app.bus.coordinator().context_ids();
    if ids.is_empty() {
        ui.label(egui::RichText::new("Nothing captured yet").weak());
        return;
    }

    // Match the scroll bar aesthetics used in the main table
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .id_salt("contexts_panel_scroll")
        .show(ui, |ui| {
            for tab in ids {
                let count = app.bus.coordinator().items(tab).len();
                let selected = app.current_tab() == Some(tab);
                if ui.selectable_label(selected, format!("Tab {tab}  ({count})")).clicked() && !selected {
                    clicked = Some(tab);
                }
            }
        });

    if let Some(tab) = clicked {
        app.select_context(tab);
    }
}
