// src/gui/components/details.rs
//
// Everything about the selected record that doesn't fit a table row.

use eframe::egui::{self, RichText, TextStyle};
use serde_json::Value;

use crate::core::sanitize::fmt_number;
use crate::gui::app::App;
use crate::model::NormalizedRecord;

use super::data_table::{badge_color, short_date};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(r) = app.selected_record() else { return };
    let r = r.clone();

    ui.horizontal(|ui| {
        ui.heading(if r.test_name.is_empty() { "Assessment" } else { r.test_name.as_str() });
        if ui.small_button("✖").on_hover_text("Close").clicked() {
            app.state.gui.selected_row = None;
        }
    });
    let badge = r.badge();
    ui.horizontal(|ui| {
        ui.label(RichText::new(badge.label()).color(badge_color(&badge)).strong());
        ui.label(r.score_label());
    });
    ui.separator();

    egui::ScrollArea::vertical().id_salt("details_scroll").show(ui, |ui| {
        egui::Grid::new("details_kv").num_columns(2).striped(true).show(ui, |ui| {
            kv(ui, "Framework", &r.framework_name);
            kv(ui, "Maturity", &r.framework_maturity_level);
            kv(ui, "Screen status", &r.screen_status);
            kv(ui, "Started", &short_date(&r.start_date));
            kv(ui, "Finished", &short_date(&r.finish_date));
            kv(ui, "Next retake", &short_date(&r.next_attempt_earliest));
            kv(ui, "Proctoring", &proctoring_summary(&r));
            kv(ui, "Session ID", &r.proctoring_session_id);
        });

        if !r.companies.is_empty() {
            ui.add_space(6.0);
            ui.label(RichText::new("Companies").strong());
            ui.horizontal_wrapped(|ui| {
                for c in &r.companies {
                    ui.label(if c.name.is_empty() { "Company" } else { c.name.as_str() });
                }
            });
        }

        let rules = &r.proctoring_options.rule_ids;
        if !rules.is_empty() {
            egui::CollapsingHeader::new(format!("Rules ({})", rules.len()))
                .id_salt("details_rules")
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for id in rules {
                            ui.label(RichText::new(value_text(id)).text_style(TextStyle::Monospace));
                        }
                    });
                });
        }

        if let Some(breakdown) = &r.coding_score_2023 {
            let ppo = breakdown.get("PPoMP").and_then(Value::as_f64);
            let areas = breakdown.get("skillAreas").and_then(Value::as_array).cloned().unwrap_or_default();
            let mut title = s!("Score breakdown");
            if let Some(p) = ppo {
                title = format!("{title} (PPoMP {}", fmt_number(p));
                if !areas.is_empty() {
                    title = format!("{title} • {} areas", areas.len());
                }
                title.push(')');
            }
            egui::CollapsingHeader::new(title).id_salt("details_breakdown").show(ui, |ui| {
                if let Some(p) = ppo {
                    ui.label(format!("PPoMP: {}", fmt_number(p)));
                }
                for area in &areas {
                    let name = area.get("name").map(value_text).unwrap_or_default();
                    let value = area.get("value").map(value_text).unwrap_or_default();
                    match area.get("label").map(value_text).filter(|l| !l.is_empty()) {
                        Some(label) => ui.label(format!("{name}: {value} ({label})")),
                        None => ui.label(format!("{name}: {value}")),
                    };
                }
            });
        }

        egui::CollapsingHeader::new("Raw JSON").id_salt("details_raw").show(ui, |ui| {
            let text = serde_json::to_string_pretty(&r.raw).unwrap_or_default();
            ui.label(RichText::new(text).text_style(TextStyle::Monospace));
        });
    });
}

fn kv(ui: &mut egui::Ui, k: &str, v: &str) {
    ui.label(RichText::new(k).weak());
    ui.label(v);
    ui.end_row();
}

fn proctoring_summary(r: &NormalizedRecord) -> String {
    let p = &r.proctoring_options;
    let mut parts = vec![if p.is_enabled { "enabled" } else { "—" }];
    for (on, what) in [
        (p.is_video_required, "video"),
        (p.is_display_required, "display"),
        (p.is_photo_required, "photo"),
        (p.is_id_photo_required, "ID"),
    ] {
        if on { parts.push(what); }
    }
    parts.join(" • ")
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(fmt_number).unwrap_or_else(|| n.to_string()),
        Value::Null => s!(),
        other => other.to_string(),
    }
}
