use std::{fmt, rc::Rc};

use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::types::{MonthYearSelection, PickerEntry};

/// Locale and "now" semantics supplied by the host application. Everything
/// date-sensitive goes through this trait so the engine never hard-codes
/// timezone or locale rules.
pub trait CalendarProvider: fmt::Debug {
    /// Today's date in the host's timezone.
    fn today(&self) -> NaiveDate;

    /// Full month name for a month value in `1..=12`.
    fn month_name(&self, month: u32) -> String;

    /// Short weekday symbols, Sunday first.
    fn weekday_symbols(&self) -> [String; 7];

    /// Same-day comparison. Dates carry no time component, so the default
    /// is plain equality; hosts with other calendar systems can override.
    fn is_same_day(&self, a: NaiveDate, b: NaiveDate) -> bool {
        a == b
    }
}

/// Default provider: local timezone, English names via chrono.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProvider;

impl CalendarProvider for LocalProvider {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn month_name(&self, month: u32) -> String {
        match NaiveDate::from_ymd_opt(2000, month, 1) {
            Some(d) => d.format("%B").to_string(),
            None => String::new(),
        }
    }

    fn weekday_symbols(&self) -> [String; 7] {
        ["S", "M", "T", "W", "T", "F", "S"].map(String::from)
    }
}

/// Date arithmetic over the injected provider plus the configured first day
/// of the week.
#[derive(Debug, Clone)]
pub struct CalendarMath {
    provider: Rc<dyn CalendarProvider>,
    week_start: Weekday,
}

impl CalendarMath {
    pub fn new(provider: Rc<dyn CalendarProvider>, week_start: Weekday) -> Self {
        Self {
            provider,
            week_start,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.provider.today()
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Inclusive day count of a month. Computed from the first day of the
    /// following month stepped back by one, so leap years fall out of the
    /// calendar rules instead of manual arithmetic.
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("month out of range");
        first_of_next.pred_opt().expect("date underflow").day()
    }

    /// Offset of a date's weekday relative to the configured week start,
    /// in `0..=6`.
    pub fn weekday_offset(&self, date: NaiveDate) -> u32 {
        (date.weekday().num_days_from_sunday() + 7 - self.week_start.num_days_from_sunday()) % 7
    }

    pub fn is_same_day(&self, a: NaiveDate, b: NaiveDate) -> bool {
        self.provider.is_same_day(a, b)
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        self.is_same_day(date, self.provider.today())
    }

    pub fn month_entry(&self, month: u32) -> PickerEntry {
        PickerEntry {
            id: month as i32,
            title: self.provider.month_name(month),
            value: month as i32,
        }
    }

    pub fn year_entry(&self, year: i32) -> PickerEntry {
        PickerEntry {
            id: year,
            title: year.to_string(),
            value: year,
        }
    }

    /// Month/year descriptor pair for an arbitrary date.
    pub fn month_year_for(&self, date: NaiveDate) -> MonthYearSelection {
        MonthYearSelection::new(
            self.month_entry(date.month()),
            self.year_entry(date.year()),
        )
    }

    /// Month arithmetic with year rollover when the month leaves `1..=12`.
    pub fn add_months(&self, current: &MonthYearSelection, delta: i32) -> MonthYearSelection {
        let zero_based = current.month.value - 1 + delta;
        let year = current.year.value + zero_based.div_euclid(12);
        let month = zero_based.rem_euclid(12) + 1;
        MonthYearSelection::new(self.month_entry(month as u32), self.year_entry(year))
    }

    pub fn previous_month(&self, current: &MonthYearSelection) -> MonthYearSelection {
        self.add_months(current, -1)
    }

    pub fn next_month(&self, current: &MonthYearSelection) -> MonthYearSelection {
        self.add_months(current, 1)
    }

    /// Short weekday symbols rotated so the configured week start comes
    /// first.
    pub fn weekday_symbols(&self) -> Vec<String> {
        let symbols = self.provider.weekday_symbols();
        let split = self.week_start.num_days_from_sunday() as usize;

        let mut rotated = Vec::with_capacity(7);
        rotated.extend_from_slice(&symbols[split..]);
        rotated.extend_from_slice(&symbols[..split]);
        rotated
    }
}
