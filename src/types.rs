use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{format::LabelFormatter, math::CalendarMath};

/// Per-week classification used for presentation emphasis. The engine only
/// carries the tag; the color or font it maps to belongs to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RowState {
    #[default]
    Default,
    Selected,
    Warning,
}

/// One selectable month or year in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PickerEntry {
    pub id: i32,
    pub title: String,
    pub value: i32,
}

/// The month/year pair currently on display, distinct from the selected
/// date. Compared by month and year value so navigation round-trips are
/// equal; the id only identifies instances in lists.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonthYearSelection {
    pub id: Uuid,
    pub month: PickerEntry,
    pub year: PickerEntry,
}

impl MonthYearSelection {
    pub fn new(month: PickerEntry, year: PickerEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            month,
            year,
        }
    }

    /// Combined display title, e.g. "September 2024".
    pub fn title(&self) -> String {
        format!("{} {}", self.month.title, self.year.title)
    }

    /// First day of the selected month, when the pair forms a valid date.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year.value, self.month.value as u32, 1)
    }
}

impl PartialEq for MonthYearSelection {
    fn eq(&self, other: &Self) -> bool {
        self.month == other.month && self.year == other.year
    }
}
impl Eq for MonthYearSelection {}

/// A single day in the grid. Immutable; selection changes produce a copy
/// with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DayCell {
    pub id: Uuid,
    pub date: NaiveDate,
    pub number: u32,
    pub label: String,
    pub is_disabled: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate, label: String, is_disabled: bool, is_selected: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            number: date.day(),
            label,
            is_disabled,
            is_selected,
        }
    }

    /// Recomputed on every read so the flag stays correct across midnight.
    pub fn is_current_date(&self, math: &CalendarMath) -> bool {
        math.is_today(self.date)
    }

    pub fn with_selected(&self, is_selected: bool) -> Self {
        Self {
            is_selected,
            ..self.clone()
        }
    }
}

/// One week of the grid: always exactly 7 cells.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WeekRow {
    pub id: Uuid,
    pub days: Vec<DayCell>,
    pub state: RowState,
    pub is_row_disabled: bool,
}

impl WeekRow {
    pub fn new(days: Vec<DayCell>, state: RowState, is_row_disabled: bool) -> Self {
        debug_assert_eq!(days.len(), 7);
        Self {
            id: Uuid::new_v4(),
            days,
            state,
            is_row_disabled,
        }
    }

    /// Whether any cell in the row holds the selection.
    pub fn is_row_active(&self) -> bool {
        self.days.iter().any(|d| d.is_selected)
    }

    pub fn has_current_date(&self, math: &CalendarMath) -> bool {
        self.days.iter().any(|d| d.is_current_date(math))
    }

    /// Formatted range from the first to the last cell's date.
    pub fn readable_date_range(&self, formatter: &dyn LabelFormatter) -> Option<String> {
        let first = self.days.first()?;
        let last = self.days.last()?;
        Some(formatter.readable_range(first.date, last.date))
    }

    pub fn with_days(&self, days: Vec<DayCell>) -> Self {
        Self {
            id: self.id,
            days,
            state: self.state,
            is_row_disabled: self.is_row_disabled,
        }
    }

    pub fn with_state(&self, state: RowState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}
fn default_enabled() -> bool {
    true
}
fn default_years_back() -> u32 {
    5
}
fn default_years_forward() -> u32 {
    10
}

/// Engine policy flags. Styling lives entirely with the presentation layer
/// and is deliberately absent here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendarOptions {
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,

    /// Allow stepping past the present month.
    #[serde(default = "default_enabled")]
    pub allow_future_navigation: bool,

    /// When true, no row of the displayed month is disabled for being in
    /// the future. Overrides `future_dates_allowed` at the row level.
    #[serde(default = "default_enabled")]
    pub future_weeks_allowed: bool,

    /// Interactivity of next-month filler cells.
    #[serde(default)]
    pub future_dates_allowed: bool,

    /// Interactivity of previous-month filler cells.
    #[serde(default)]
    pub filler_dates_enabled: bool,

    #[serde(default = "default_years_back")]
    pub years_back: u32,
    #[serde(default = "default_years_forward")]
    pub years_forward: u32,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            allow_future_navigation: true,
            future_weeks_allowed: true,
            future_dates_allowed: false,
            filler_dates_enabled: false,
            years_back: 5,
            years_forward: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::date;

    #[test]
    fn month_year_equality_ignores_instance_id() {
        let a = MonthYearSelection::new(
            PickerEntry {
                id: 9,
                title: "September".into(),
                value: 9,
            },
            PickerEntry {
                id: 2024,
                title: "2024".into(),
                value: 2024,
            },
        );
        let b = MonthYearSelection::new(a.month.clone(), a.year.clone());

        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
        assert_eq!(a.first_day(), Some(date(2024, 9, 1)));
    }

    #[test]
    fn cell_selection_copies_keep_identity() {
        let cell = DayCell::new(date(2024, 8, 5), "Monday, August 5".into(), false, false);
        let selected = cell.with_selected(true);

        assert_eq!(cell.id, selected.id);
        assert_eq!(cell.number, 5);
        assert!(!cell.is_selected);
        assert!(selected.is_selected);
    }

    #[test]
    fn row_activity_follows_cell_selection() {
        let days: Vec<DayCell> = (5..12)
            .map(|d| DayCell::new(date(2024, 8, d), String::new(), false, d == 7))
            .collect();
        let row = WeekRow::new(days, RowState::Default, false);

        assert!(row.is_row_active());

        let cleared = row.with_days(
            row.days
                .iter()
                .map(|d| d.with_selected(false))
                .collect(),
        );
        assert_eq!(row.id, cleared.id);
        assert!(!cleared.is_row_active());

        let flagged = row.with_state(RowState::Warning);
        assert_eq!(flagged.state, RowState::Warning);
        assert_eq!(flagged.state.to_string(), "warning");
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: CalendarOptions = serde_json::from_str("{}").unwrap();

        assert_eq!(options.week_start, Weekday::Sun);
        assert!(options.allow_future_navigation);
        assert!(options.future_weeks_allowed);
        assert!(!options.future_dates_allowed);
        assert!(!options.filler_dates_enabled);
        assert_eq!(options.years_back, 5);
        assert_eq!(options.years_forward, 10);
    }
}
