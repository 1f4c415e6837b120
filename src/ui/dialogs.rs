use eframe::egui::{self, Align2, RichText};

use super::palette;
use crate::models::event::{Category, EventDraft, EventRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Add { date: String },
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    Pending,
    Save(EventDraft),
    Cancel,
}

/// The add/edit form. Stays open until a valid draft is saved or it is cancelled.
#[derive(Debug, Clone)]
pub struct EventDialog {
    pub mode: DialogMode,
    draft: EventDraft,
    warning: Option<String>,
}

impl EventDialog {
    pub fn add(date: &str) -> Self {
        Self {
            mode: DialogMode::Add {
                date: date.to_string(),
            },
            draft: EventDraft::default(),
            warning: None,
        }
    }

    pub fn edit(record: &EventRecord) -> Self {
        Self {
            mode: DialogMode::Edit {
                id: record.id.clone(),
            },
            draft: record.draft(),
            warning: None,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> DialogAction {
        let (title, save_label) = match &self.mode {
            DialogMode::Add { .. } => ("Add New Event", "Save Event"),
            DialogMode::Edit { .. } => ("Edit Event", "Update Event"),
        };
        let mut action = DialogAction::Pending;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if let DialogMode::Add { date } = &self.mode {
                    ui.label(format!("Date: {}", date));
                }
                ui.label("Event Name:");
                ui.text_edit_singleline(&mut self.draft.event);
                ui.label("Start Time (optional, e.g., 2:30 PM):");
                ui.text_edit_singleline(&mut self.draft.start_time);
                ui.label("End Time (optional, e.g., 4:00 PM):");
                ui.text_edit_singleline(&mut self.draft.end_time);

                egui::ComboBox::from_label("Category")
                    .selected_text(self.draft.category.as_str())
                    .show_ui(ui, |ui| {
                        for category in Category::ALL {
                            ui.selectable_value(
                                &mut self.draft.category,
                                category,
                                category.as_str(),
                            );
                        }
                    });

                if let Some(warning) = &self.warning {
                    ui.colored_label(palette::WEEKEND, warning);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let save = egui::Button::new(RichText::new(save_label).strong())
                        .fill(palette::BUTTON);
                    if ui.add(save).clicked() {
                        match self.draft.clone().validated() {
                            Ok(draft) => action = DialogAction::Save(draft),
                            Err(message) => self.warning = Some(message.to_string()),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        action = DialogAction::Cancel;
                    }
                });
            });

        action
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Pending,
    Yes,
    No,
}

pub fn confirm(ctx: &egui::Context, title: &str, question: &str) -> Confirmation {
    let mut answer = Confirmation::Pending;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(question);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    answer = Confirmation::Yes;
                }
                if ui.button("No").clicked() {
                    answer = Confirmation::No;
                }
            });
        });
    answer
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

/// A blocking message box: warnings for missing selections, errors for failed saves.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn warning(title: &str, message: &str) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Returns true once dismissed.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;
        let color = match self.kind {
            NoticeKind::Warning => palette::ACCENT,
            NoticeKind::Error => palette::WEEKEND,
        };
        egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(color, &self.message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        dismissed
    }
}
