// src/gui/components/paywall.rs
//
// Shown instead of everything else until the user is entitled.
// Both buttons hand off to the provider and (re)start polling.

use eframe::egui::{self, RichText};
use crate::config::consts::PAYWALL_POLL_TRIES;
use crate::gui::app::{App, Gate};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading("Unlock assessment results");
        ui.add_space(8.0);
        ui.label("Viewing and exporting captured results requires a paid plan.");
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            if ui.button(RichText::new("Unlock").strong()).clicked() {
                logf!("Paywall: open checkout");
                app.entitlement.open_checkout(None);
                app.start_polling();
            }
            if ui.button("I already paid").clicked() {
                logf!("Paywall: open login");
                app.entitlement.open_login_page();
                app.start_polling();
            }
        });

        ui.add_space(12.0);
        match app.gate {
            Gate::Polling { tries, .. } => {
                ui.horizontal(|ui| {
                    ui.add(egui::widgets::Spinner::new().size(14.0));
                    ui.label(format!("Waiting for payment… ({}/{})", tries, PAYWALL_POLL_TRIES));
                });
            }
            Gate::Locked => { ui.label(RichText::new("Not unlocked yet.").weak()); }
            Gate::Unlocked => {}
        }
    });
}
