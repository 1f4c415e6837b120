use eframe::egui::{self, Key, RichText};

use super::palette;
use crate::app_state::AppState;
use crate::service::assistant_service::Speaker;

/// The assistant window. Sending is disabled while a reply is pending.
pub fn show(ctx: &egui::Context, open: &mut bool, state: &mut AppState, input: &mut String) {
    let mut still_open = *open;
    egui::Window::new("🤖 AI Calendar Assistant")
        .open(&mut still_open)
        .default_size([600.0, 700.0])
        .show(ctx, |ui| {
            let input_height = 40.0;
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .stick_to_bottom(true)
                .max_height(ui.available_height() - input_height)
                .show(ui, |ui| {
                    for line in state.chat().lines() {
                        let color = match line.speaker {
                            Speaker::You => palette::USER_LABEL,
                            Speaker::Assistant => palette::ASSISTANT_LABEL,
                        };
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                RichText::new(format!("{}:", line.speaker.label()))
                                    .color(color)
                                    .strong(),
                            );
                            ui.label(RichText::new(&line.text).color(palette::TEXT));
                        });
                        ui.add_space(8.0);
                    }
                    if state.chat_busy() {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Assistant is thinking…");
                        });
                    }
                });

            ui.separator();
            ui.horizontal(|ui| {
                let busy = state.chat_busy();
                let response = ui.add_enabled(
                    !busy,
                    egui::TextEdit::singleline(input)
                        .hint_text("Ask about your schedule or add an event…")
                        .desired_width(ui.available_width() - 140.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                let send = egui::Button::new(RichText::new("Send").strong()).fill(palette::BUTTON);
                if (ui.add_enabled(!busy, send).clicked() || submitted) && state.send_chat(input) {
                    input.clear();
                    response.request_focus();
                }
                if busy && ui.button("Cancel").clicked() {
                    state.cancel_chat();
                }
            });
        });

    if !still_open {
        state.cancel_chat();
    }
    *open = still_open;
}
