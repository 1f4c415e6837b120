use eframe::egui::{self, Color32, Margin, RichText, Sense, Stroke};

use super::palette;
use crate::service::day_listing::ListingRow;

/// Draws the day's rows. Clicking an entry selects it by record id.
pub fn show(ui: &mut egui::Ui, rows: &[ListingRow], selected: &mut Option<String>) {
    if rows.is_empty() {
        ui.label(RichText::new("No events for this day.").italics().color(palette::TEXT));
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for row in rows {
                match row {
                    ListingRow::Header(block) => {
                        egui::Frame::none()
                            .fill(palette::BLOCK_HEADER)
                            .inner_margin(Margin::symmetric(10.0, 4.0))
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.label(
                                    RichText::new(block.heading())
                                        .color(Color32::WHITE)
                                        .strong(),
                                );
                            });
                    }
                    ListingRow::Entry { id, text, category } => {
                        let (bg, fg) = palette::category_colors(*category);
                        let is_selected = selected.as_deref() == Some(id.as_str());
                        let stroke = if is_selected {
                            Stroke::new(2.0, palette::ACCENT)
                        } else {
                            Stroke::NONE
                        };
                        let response = egui::Frame::none()
                            .fill(bg)
                            .stroke(stroke)
                            .inner_margin(Margin::symmetric(18.0, 6.0))
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.label(RichText::new(text).color(fg).size(14.0));
                            })
                            .response
                            .interact(Sense::click());
                        if response.clicked() {
                            *selected = Some(id.clone());
                        }
                    }
                }
                ui.add_space(2.0);
            }
        });
}
