use eframe::egui;

use crate::common::ChatMessage;

const NOTICE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xef, 0x44, 0x44);

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage]) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in messages {
                render_message(ui, message);
                ui.add_space(6.0);
            }
        });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    if message.is_system_notice {
        ui.colored_label(NOTICE_COLOR, format!("⚠ {}", message.text));
        return;
    }

    if message.is_incoming() {
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new(&message.author).strong());
            ui.label(egui::RichText::new(&message.text).weak());
        });
    } else {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            ui.label(&message.text);
        });
    }
}
