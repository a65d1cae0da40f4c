use crate::errors::DateKeyError;
use crate::models::{CellView, CursorView, OutcomeVariant};
use crate::store::DayStore;
use chrono::{Datelike, Local, NaiveDate};

/// Six rows of seven days, Monday first.
pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month shown by the calendar. `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: u32,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.min(11),
        }
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self::new(today.year(), today.month0())
    }

    pub fn prev_month(&mut self) {
        if self.month == 0 {
            self.month = 11;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month == 11 {
            self.month = 0;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize], self.year)
    }

    /// Column of the 1st of the month, Monday = 0.
    pub fn first_weekday_offset(&self) -> usize {
        self.first_day()
            .map(|date| date.weekday().num_days_from_monday() as usize)
            .unwrap_or(0)
    }

    pub fn days_in_month(&self) -> u32 {
        let Some(first) = self.first_day() else {
            return 0;
        };
        let mut next = *self;
        next.next_month();
        match next.first_day() {
            Some(next_first) => (next_first - first).num_days() as u32,
            None => 31,
        }
    }

    pub fn view(&self) -> CursorView {
        CursorView {
            year: self.year,
            month: self.month,
        }
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStyle {
    Plain,
    Positive,
    PositiveOutline,
    Negative,
}

impl DayStyle {
    pub fn for_entry(variant: Option<OutcomeVariant>) -> Self {
        match variant {
            Some(OutcomeVariant::Negative) => DayStyle::Negative,
            Some(OutcomeVariant::PositiveOutline) => DayStyle::PositiveOutline,
            Some(OutcomeVariant::Positive) => DayStyle::Positive,
            None => DayStyle::Plain,
        }
    }

    pub fn css_class(self, selected: bool) -> String {
        let mut class = String::from("day-btn");
        match self {
            DayStyle::Plain => {}
            DayStyle::Positive => class.push_str(" pos"),
            DayStyle::PositiveOutline => class.push_str(" pos-outline"),
            DayStyle::Negative => class.push_str(" neg"),
        }
        if selected {
            class.push_str(" selected");
        }
        class
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    Empty,
    Day {
        day: u32,
        date_key: String,
        style: DayStyle,
        selected: bool,
    },
}

impl CalendarCell {
    pub fn is_empty(&self) -> bool {
        matches!(self, CalendarCell::Empty)
    }

    pub fn view(&self) -> CellView {
        match self {
            CalendarCell::Empty => CellView {
                day: None,
                date_key: None,
                class: "day-btn empty".to_string(),
            },
            CalendarCell::Day {
                day,
                date_key,
                style,
                selected,
            } => CellView {
                day: Some(*day),
                date_key: Some(date_key.clone()),
                class: style.css_class(*selected),
            },
        }
    }
}

pub fn render_grid(cursor: CalendarCursor, store: &DayStore, selected: Option<&str>) -> Vec<CalendarCell> {
    let offset = cursor.first_weekday_offset();
    let days = cursor.days_in_month() as usize;

    (0..GRID_CELLS)
        .map(|index| {
            if index < offset || index >= offset + days {
                return CalendarCell::Empty;
            }

            let day = (index - offset + 1) as u32;
            let date_key = format_date_key(cursor.year, cursor.month, day);
            let style = DayStyle::for_entry(store.get(&date_key).map(|entry| entry.variant));
            let selected = selected == Some(date_key.as_str());
            CalendarCell::Day {
                day,
                date_key,
                style,
                selected,
            }
        })
        .collect()
}

pub fn format_date_key(year: i32, month0: u32, day: u32) -> String {
    format!("{year}-{:02}-{day:02}", month0 + 1)
}

/// Accepts only canonical keys that name a real calendar date.
pub fn parse_date_key(value: &str) -> Result<NaiveDate, DateKeyError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == value)
        .ok_or_else(|| DateKeyError(value.to_string()))
}
