use eframe::egui;

/// Returns true when "Clear Chat" was clicked.
pub fn render(ui: &mut egui::Ui, message_count: usize) -> bool {
    let mut clear = false;
    ui.horizontal(|ui| {
        ui.heading("Safety Chat");
        ui.label(egui::RichText::new(format!("{message_count} messages")).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🗑 Clear Chat").clicked() {
                clear = true;
            }
        });
    });
    clear
}
