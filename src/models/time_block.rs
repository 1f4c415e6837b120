use chrono::{Datelike, NaiveDate};

/// Minutes value for empty or unparseable times, so they sort last.
pub const NO_TIME_SENTINEL: u32 = 9999;
pub const DAY_FORMAT: &str = "%m/%d/%y";

const NOON: u32 = 12 * 60;
const FIVE_PM: u32 = 17 * 60;
const NINE_PM: u32 = 21 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeBlock {
    Morning,
    Afternoon,
    Evening,
    Night,
    AllDay,
}

impl TimeBlock {
    pub const ORDER: [TimeBlock; 5] = [
        TimeBlock::Morning,
        TimeBlock::Afternoon,
        TimeBlock::Evening,
        TimeBlock::Night,
        TimeBlock::AllDay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeBlock::Morning => "Morning",
            TimeBlock::Afternoon => "Afternoon",
            TimeBlock::Evening => "Evening",
            TimeBlock::Night => "Night",
            TimeBlock::AllDay => "All Day",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            TimeBlock::Morning => "🌅",
            TimeBlock::Afternoon => "☀️",
            TimeBlock::Evening => "🌆",
            TimeBlock::Night => "🌙",
            TimeBlock::AllDay => "📅",
        }
    }

    pub fn heading(&self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }

    pub fn from_minutes(minutes: u32) -> Self {
        if minutes >= NO_TIME_SENTINEL {
            TimeBlock::AllDay
        } else if minutes < NOON {
            TimeBlock::Morning
        } else if minutes < FIVE_PM {
            TimeBlock::Afternoon
        } else if minutes < NINE_PM {
            TimeBlock::Evening
        } else {
            TimeBlock::Night
        }
    }
}

/// Converts "2:30 PM", "14:30" or "9" to minutes since midnight.
pub fn to_minutes(text: &str) -> u32 {
    parse_minutes(text).unwrap_or(NO_TIME_SENTINEL)
}

pub fn bucket(text: &str) -> TimeBlock {
    TimeBlock::from_minutes(to_minutes(text))
}

fn parse_minutes(text: &str) -> Option<u32> {
    let upper = text.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }

    if upper.contains("AM") || upper.contains("PM") {
        let is_pm = upper.contains("PM");
        let time_part = upper.replace("AM", "").replace("PM", "");
        let (hours, minutes) = split_clock(time_part.trim())?;
        if hours > 12 {
            return None;
        }
        let hours = match (is_pm, hours) {
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, 12) => 0,
            (false, h) => h,
        };
        return Some(hours * 60 + minutes);
    }

    let (hours, minutes) = split_clock(&upper)?;
    if hours >= 24 {
        return None;
    }
    Some(hours * 60 + minutes)
}

// Minutes past 59 are rejected here; each caller bounds the hours.
fn split_clock(text: &str) -> Option<(u32, u32)> {
    let (hours, minutes) = match text.split_once(':') {
        Some((h, m)) => (h.trim().parse().ok()?, m.trim().parse().ok()?),
        None => (text.trim().parse().ok()?, 0),
    };
    (minutes < 60).then_some((hours, minutes))
}

/// Parses the calendar's `M/D/YY` day string.
pub fn parse_day(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DAY_FORMAT).ok()
}

/// Formats a day as `M/D/YY` without zero padding, e.g. `1/5/26`.
pub fn format_day(date: NaiveDate) -> String {
    format!("{}/{}/{:02}", date.month(), date.day(), date.year() % 100)
}
