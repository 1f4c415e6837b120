pub mod chat_window;
pub mod dialogs;
pub mod event_list;
pub mod month_view;
pub mod palette;

use eframe::egui::{self, Color32, Margin, RichText};
use tracing::{error, info};

use crate::app_state::AppState;
use crate::models::store::StoreError;
use crate::models::time_block::parse_day;
use dialogs::{Confirmation, DialogAction, DialogMode, EventDialog, Notice};
use month_view::MonthCursor;

pub const WINDOW_TITLE: &str = "AI Scheduler with Weather Forecast";

pub struct CalendarApp {
    state: AppState,
    cursor: MonthCursor,
    selected_row: Option<String>,
    dialog: Option<EventDialog>,
    pending_delete: Option<String>,
    notice: Option<Notice>,
    chat_open: bool,
    chat_input: String,
    saved_on_close: bool,
}

impl CalendarApp {
    pub fn new(state: AppState) -> Self {
        let cursor = MonthCursor::containing(state.today());
        Self {
            state,
            cursor,
            selected_row: None,
            dialog: None,
            pending_delete: None,
            notice: None,
            chat_open: false,
            chat_input: String::new(),
            saved_on_close: false,
        }
    }

    fn report_save(&mut self, result: Result<(), StoreError>) {
        if let Err(err) = result {
            error!(error = %err, "failed to save calendar data");
            self.notice = Some(Notice::error("Save Error", &err.to_string()));
        }
    }

    fn select_date(&mut self, date: &str) {
        self.state.select_date(date);
        self.selected_row = None;
        if let Some(day) = parse_day(date) {
            self.cursor = MonthCursor::containing(day);
        }
    }

    fn header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(palette::ACCENT).inner_margin(Margin::same(14.0)))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("📅 Life Wellness Calendar")
                            .size(24.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                });
            });
    }

    fn buttons(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("controls")
            .frame(egui::Frame::none().fill(palette::BACKGROUND).inner_margin(Margin::same(12.0)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let button = |text: &str, fill: Color32| {
                        egui::Button::new(RichText::new(text).strong().color(Color32::WHITE))
                            .fill(fill)
                    };
                    if ui.add(button("➕ Add Event", palette::BUTTON)).clicked() {
                        self.dialog = Some(EventDialog::add(self.state.selected_date()));
                    }
                    if ui.add(button("✏️ Edit Event", palette::BUTTON)).clicked() {
                        self.begin_edit();
                    }
                    if ui.add(button("🗑️ Delete Event", palette::BUTTON)).clicked() {
                        self.begin_delete();
                    }
                    if ui.add(button("🤖 AI Chatbot", palette::ASSISTANT_BUTTON)).clicked()
                        && !self.chat_open
                    {
                        self.state.restart_chat();
                        self.chat_input.clear();
                        self.chat_open = true;
                    }
                });
            });
    }

    /// The selected row's record, if it still belongs to the selected day.
    fn selected_record_id(&self) -> Option<String> {
        let id = self.selected_row.as_deref()?;
        self.state
            .store()
            .get(id)
            .filter(|record| record.date == self.state.selected_date())
            .map(|record| record.id.clone())
    }

    fn begin_edit(&mut self) {
        let Some(id) = self.selected_record_id() else {
            self.notice = Some(Notice::warning("Edit Event", "Please select an event to edit."));
            return;
        };
        if let Some(record) = self.state.store().get(&id) {
            self.dialog = Some(EventDialog::edit(record));
        }
    }

    fn begin_delete(&mut self) {
        match self.selected_record_id() {
            Some(id) => self.pending_delete = Some(id),
            None => {
                self.notice = Some(Notice::warning(
                    "Delete Event",
                    "Please select an event to delete.",
                ))
            }
        }
    }

    fn calendar_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("calendar")
            .resizable(false)
            .exact_width(380.0)
            .frame(egui::Frame::none().fill(Color32::WHITE).inner_margin(Margin::same(12.0)))
            .show(ctx, |ui| {
                ui.label(RichText::new("Select Date").strong().size(16.0).color(palette::ACCENT));
                ui.add_space(6.0);
                let picked = month_view::show(
                    ui,
                    &mut self.cursor,
                    self.state.selected_date(),
                    self.state.today(),
                    self.state.store(),
                );
                if let Some(date) = picked {
                    self.select_date(&date);
                }

                ui.add_space(16.0);
                ui.label(RichText::new("Weather Forecast").strong().color(palette::ACCENT));
                egui::Frame::none()
                    .fill(palette::WEATHER_BG)
                    .inner_margin(Margin::same(10.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(self.state.weather_text()).color(palette::TEXT));
                    });
            });
    }

    fn events_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE).inner_margin(Margin::same(12.0)))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("Events for {}", self.state.selected_date()))
                        .strong()
                        .size(16.0)
                        .color(palette::ACCENT),
                );
                ui.add_space(6.0);
                let rows = self.state.day_listing();
                event_list::show(ui, &rows, &mut self.selected_row);
            });
    }

    fn modals(&mut self, ctx: &egui::Context) {
        if let Some(notice) = &self.notice {
            if notice.show(ctx) {
                self.notice = None;
            }
            return;
        }

        if let Some(dialog) = self.dialog.as_mut() {
            match dialog.show(ctx) {
                DialogAction::Pending => {}
                DialogAction::Cancel => self.dialog = None,
                DialogAction::Save(draft) => {
                    let mode = dialog.mode.clone();
                    self.dialog = None;
                    let result = match mode {
                        DialogMode::Add { date } => self.state.add_event(&date, draft).map(|id| {
                            if date == self.state.selected_date() {
                                self.selected_row = Some(id);
                            }
                        }),
                        DialogMode::Edit { id } => self.state.update_event(&id, draft).map(|_| ()),
                    };
                    self.report_save(result);
                }
            }
            return;
        }

        if let Some(id) = self.pending_delete.clone() {
            match dialogs::confirm(
                ctx,
                "Confirm Delete",
                "Are you sure you want to delete this event?",
            ) {
                Confirmation::Pending => {}
                Confirmation::No => self.pending_delete = None,
                Confirmation::Yes => {
                    self.pending_delete = None;
                    self.selected_row = None;
                    let result = self.state.delete_event(&id).map(|_| ());
                    self.report_save(result);
                }
            }
        }
    }
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let polled = self.state.poll_events();
        self.report_save(polled);

        self.header(ctx);
        self.buttons(ctx);
        self.calendar_panel(ctx);
        self.events_panel(ctx);
        if self.chat_open {
            chat_window::show(ctx, &mut self.chat_open, &mut self.state, &mut self.chat_input);
        }
        self.modals(ctx);

        if ctx.input(|i| i.viewport().close_requested()) && !self.saved_on_close {
            self.saved_on_close = true;
            info!("window closing, saving calendar data");
            if let Err(err) = self.state.save() {
                error!(error = %err, "failed to save calendar data on close");
            }
        }
    }
}
