// src/gui/components/data_table.rs
//
// Records of the current context, one row each. Clicking a row selects it
// for the details panel; clicking it again clears the selection.

use eframe::egui::{self, Align, Color32, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::gui::app::App;
use crate::model::StatusBadge;

const HEADERS: [&str; 7] = ["Assessment", "Framework", "Status", "Score", "Started", "Finished", "Next retake"];
const WIDTHS: [f32; 7] = [220.0, 160.0, 90.0, 70.0, 150.0, 150.0, 150.0];

pub fn badge_color(badge: &StatusBadge) -> Color32 {
    match badge {
        StatusBadge::Certified => Color32::from_rgb(0x3C, 0xB3, 0x71),
        StatusBadge::Pending => Color32::from_rgb(0xF0, 0xD2, 0x3C),
        StatusBadge::Rejected => Color32::from_rgb(0xDC, 0x61, 0x49),
        StatusBadge::Other(_) => Color32::GRAY,
    }
}

/// ISO timestamp → `YYYY-MM-DD HH:MM`; anything else as is.
pub fn short_date(s: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => s.to_string(),
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if app.records.is_empty() {
        ui.label(RichText::new("No assessment results in this context. Scan a capture to add some.").weak());
        return;
    }

    // Ensure scroll bars allocate space (not floating over content)
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .min_scrolled_height(0.0);
    for w in WIDTHS {
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(40.0));
    }

    let selected = app.state.gui.selected_row;
    let mut clicked: Option<usize> = None;
    let records = &app.records;

    table
        .header(24.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| {
                    ui.add(egui::Label::new(RichText::new(h).strong()).selectable(false));
                });
            }
        })
        .body(|body| {
            body.rows(20.0, records.len(), |mut row| {
                let ix = row.index();
                let Some(r) = records.get(ix) else { return };
                row.set_selected(selected == Some(ix));

                let badge = r.badge();
                let title = if r.test_name.is_empty() { "Assessment" } else { r.test_name.as_str() };
                let framework = if r.framework_maturity_level.is_empty() {
                    r.framework_name.clone()
                } else {
                    format!("{} • {}", r.framework_name, r.framework_maturity_level)
                };

                let cells = [
                    RichText::new(title),
                    RichText::new(framework),
                    RichText::new(badge.label()).color(badge_color(&badge)).strong(),
                    RichText::new(r.score_label()),
                    RichText::new(short_date(&r.start_date)),
                    RichText::new(short_date(&r.finish_date)),
                    RichText::new(short_date(&r.next_attempt_earliest)),
                ];
                for (ci, text) in cells.into_iter().enumerate() {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        if ci == 3 {
                            ui.centered_and_justified(|ui| { ui.add(egui::Label::new(text).selectable(false)); });
                        } else {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                                ui.add(egui::Label::new(text).selectable(false));
                            });
                        }
                    });
                }

                if row.response().clicked() {
                    clicked = Some(ix);
                }
            });
        });

    if let Some(ix) = clicked {
        app.state.gui.selected_row = if selected == Some(ix) { None } else { Some(ix) };
        logd!("UI: row selection → {:?}", app.state.gui.selected_row);
    }
}
