use chrono::{Datelike, Months, NaiveDate, Weekday};
use eframe::egui::{self, Color32, RichText};

use super::palette;
use crate::models::store::EventStore;
use crate::models::time_block::{format_day, parse_day};

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const DAY_CELL: [f32; 2] = [44.0, 36.0];

/// Weeks of the month, Sunday first. Cells outside the month are `None`.
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut column = first.weekday().num_days_from_sunday() as usize;
    let mut day = first;
    while day.month() == month {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if column > 0 {
        weeks.push(week);
    }
    weeks
}

/// The month currently shown; independent of the selected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

/// Draws the month grid. Returns the newly picked day as `M/D/YY`, if any.
pub fn show(
    ui: &mut egui::Ui,
    cursor: &mut MonthCursor,
    selected: &str,
    today: NaiveDate,
    store: &EventStore,
) -> Option<String> {
    let mut picked = None;
    let selected_day = parse_day(selected);

    ui.horizontal(|ui| {
        if ui.button("◀").clicked() {
            *cursor = cursor.previous();
        }
        ui.label(RichText::new(cursor.title()).strong().size(16.0));
        if ui.button("▶").clicked() {
            *cursor = cursor.next();
        }
        if ui.button("Today").clicked() {
            *cursor = MonthCursor::containing(today);
            picked = Some(format_day(today));
        }
    });
    ui.add_space(6.0);

    egui::Grid::new("month_grid")
        .num_columns(7)
        .spacing([4.0, 4.0])
        .show(ui, |ui| {
            for header in WEEKDAY_HEADERS {
                ui.label(RichText::new(header).strong().color(palette::ACCENT));
            }
            ui.end_row();

            for week in month_grid(cursor.year(), cursor.month()) {
                for cell in week {
                    let Some(day) = cell else {
                        ui.label("");
                        continue;
                    };
                    let key = format_day(day);
                    let is_selected = selected_day == Some(day);
                    let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
                    let marker = if store.has_events_on(&key) { "•" } else { "" };

                    let mut text = RichText::new(format!("{}{}", day.day(), marker)).size(15.0);
                    text = if is_selected {
                        text.color(Color32::WHITE).strong()
                    } else if weekend {
                        text.color(palette::WEEKEND)
                    } else {
                        text
                    };
                    if day == today {
                        text = text.underline();
                    }
                    let fill = if is_selected {
                        palette::BUTTON
                    } else {
                        Color32::TRANSPARENT
                    };
                    let button = egui::Button::new(text).fill(fill);
                    if ui.add_sized(DAY_CELL, button).clicked() && !is_selected {
                        picked = Some(key);
                    }
                }
                ui.end_row();
            }
        });

    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_starts_on_the_right_weekday() {
        // October 1, 2026 is a Thursday.
        let weeks = month_grid(2026, 10);
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][3], None);
        assert_eq!(weeks[0][4], NaiveDate::from_ymd_opt(2026, 10, 1));
        assert_eq!(weeks[4][6], NaiveDate::from_ymd_opt(2026, 10, 31));
    }

    #[test]
    fn grid_covers_every_day_once() {
        let days: Vec<NaiveDate> = month_grid(2028, 2).into_iter().flatten().flatten().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), NaiveDate::from_ymd_opt(2028, 2, 1).as_ref());
        assert_eq!(days.last(), NaiveDate::from_ymd_opt(2028, 2, 29).as_ref());
    }

    #[test]
    fn cursor_wraps_years() {
        let january = MonthCursor::containing(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        let december = january.previous();
        assert_eq!((december.year(), december.month()), (2025, 12));
        assert_eq!(december.next(), january);
        assert_eq!(january.title(), "January 2026");
    }
}
