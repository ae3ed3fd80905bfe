use eframe::egui;

/// The `messages` list.
pub fn render(ui: &mut egui::Ui, items: &[String]) {
    egui::ScrollArea::vertical()
        .id_salt("messages")
        .stick_to_bottom(true)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for item in items {
                ui.label(item);
            }
        });
}
