use eframe::egui;

use crate::monitor::Alert;

/// Returns true when the close button was clicked.
pub fn render(ui: &mut egui::Ui, alert: &Alert) -> bool {
    let mut dismissed = false;
    ui.horizontal(|ui| {
        ui.colored_label(egui::Color32::RED, "⚠ Safety Alert");
        ui.label(&alert.message);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("×").clicked() {
                dismissed = true;
            }
        });
    });
    dismissed
}
