use eframe::egui;

use crate::ui::state::AppState;

/// Returns the committed text when the user presses Send or Enter.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<String> {
    let sending = state.is_sending();
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.input_text)
                .hint_text("Type your message here..."),
        );

        let label = if sending { "Sending..." } else { "Send" };
        if ui.add_enabled(!sending, egui::Button::new(label)).clicked() {
            send = true;
        }

        if !sending && response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
    });

    if send { state.take_input() } else { None }
}
