use eframe::egui;

/// The `message-form`. Returns `true` when it was submitted this frame, by
/// the Send button or Enter in the input. The input is left untouched.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> bool {
    let mut submitted = false;
    ui.push_id("message-form", |ui| {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(input_text)
                    .id_salt("message")
                    .hint_text("Message"),
            );
            if ui.button("Send").clicked() {
                submitted = true;
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }
        });
    });
    submitted
}
