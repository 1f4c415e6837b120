use eframe::egui::Color32;

use crate::models::event::Category;

pub const BACKGROUND: Color32 = Color32::from_rgb(0xF5, 0xF5, 0xF5);
pub const ACCENT: Color32 = Color32::from_rgb(0x2C, 0x3E, 0x50);
pub const BUTTON: Color32 = Color32::from_rgb(0x34, 0x98, 0xDB);
pub const ASSISTANT_BUTTON: Color32 = Color32::from_rgb(0x9B, 0x59, 0xB6);
pub const WEEKEND: Color32 = Color32::from_rgb(0xE7, 0x4C, 0x3C);
pub const BLOCK_HEADER: Color32 = Color32::from_rgb(0x34, 0x49, 0x5E);
pub const WEATHER_BG: Color32 = Color32::from_rgb(0xF0, 0xF8, 0xFF);
pub const USER_LABEL: Color32 = BUTTON;
pub const ASSISTANT_LABEL: Color32 = Color32::from_rgb(0x27, 0xAE, 0x60);
pub const TEXT: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

/// (background, foreground) for an event row.
pub fn category_colors(category: Category) -> (Color32, Color32) {
    let colors = category.colors();
    let [br, bg, bb] = colors.bg;
    let [fr, fg, fb] = colors.fg;
    (Color32::from_rgb(br, bg, bb), Color32::from_rgb(fr, fg, fb))
}
