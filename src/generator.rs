use std::rc::Rc;

use chrono::NaiveDate;
use tracing::warn;

use crate::{
    format::LabelFormatter,
    math::CalendarMath,
    types::{DayCell, MonthYearSelection, RowState, WeekRow},
};

pub const GRID_ROWS: usize = 6;
pub const GRID_COLUMNS: usize = 7;

/// Builds one month page: a fixed 6x7 grid padded with days from the
/// adjacent months.
pub struct GridGenerator {
    math: CalendarMath,
    formatter: Rc<dyn LabelFormatter>,
    filler_dates_enabled: bool,
}

impl GridGenerator {
    pub fn new(
        math: CalendarMath,
        formatter: Rc<dyn LabelFormatter>,
        filler_dates_enabled: bool,
    ) -> Self {
        Self {
            math,
            formatter,
            filler_dates_enabled,
        }
    }

    /// Full page for a month. Always 6 rows of 7 cells: leading cells come
    /// from the previous month, trailing cells from the next. Rows whose
    /// first date lies past today are disabled unless `future_weeks_allowed`.
    pub fn generate(
        &self,
        month_year: &MonthYearSelection,
        selected_date: NaiveDate,
        future_weeks_allowed: bool,
        future_dates_allowed: bool,
    ) -> Vec<WeekRow> {
        let mut days = self.leading_filler(month_year, selected_date);
        days.extend(self.month_days(month_year, selected_date));

        let today = self.math.today();
        let mut rows = Vec::with_capacity(GRID_ROWS);
        let mut index = 0;
        let mut fill_start = 1u32;

        for _ in 0..GRID_ROWS {
            let mut week: Vec<DayCell> = Vec::with_capacity(GRID_COLUMNS);
            while week.len() < GRID_COLUMNS && index < days.len() {
                week.push(days[index].clone());
                index += 1;
            }

            if week.len() < GRID_COLUMNS {
                // Continue next-month numbering across trailing rows.
                let fill = GRID_COLUMNS - week.len();
                week.extend(self.trailing_filler(
                    month_year,
                    selected_date,
                    fill_start,
                    fill,
                    !future_dates_allowed,
                ));
                fill_start += fill as u32;
            }

            let is_row_disabled =
                !future_weeks_allowed && week.first().is_some_and(|d| d.date > today);
            rows.push(WeekRow::new(week, RowState::Default, is_row_disabled));
        }

        rows
    }

    /// Real days of the month, `1..=days_in_month`, in order.
    fn month_days(&self, month_year: &MonthYearSelection, selected_date: NaiveDate) -> Vec<DayCell> {
        let month = month_year.month.value as u32;
        let year = month_year.year.value;

        (1..=self.math.days_in_month(month, year))
            .filter_map(|day| self.day_cell(year, month, day, selected_date, false))
            .collect()
    }

    /// Trailing days of the previous month, oldest first, covering the
    /// weekday offset of the month's first day. Non-interactive unless
    /// filler dates are enabled.
    fn leading_filler(
        &self,
        month_year: &MonthYearSelection,
        selected_date: NaiveDate,
    ) -> Vec<DayCell> {
        let Some(first) = month_year.first_day() else {
            warn!(
                month = month_year.month.value,
                year = month_year.year.value,
                "month/year pair is not a valid date, page gets no leading filler"
            );
            return Vec::new();
        };

        let offset = self.math.weekday_offset(first);
        if offset == 0 {
            return Vec::new();
        }

        let previous = self.math.previous_month(month_year);
        let month = previous.month.value as u32;
        let year = previous.year.value;
        let count = self.math.days_in_month(month, year);
        let start = count - offset + 1;

        (start..=count)
            .filter_map(|day| {
                self.day_cell(year, month, day, selected_date, !self.filler_dates_enabled)
            })
            .collect()
    }

    /// Leading days of the next month starting at `start`, at most `limit`
    /// cells.
    fn trailing_filler(
        &self,
        month_year: &MonthYearSelection,
        selected_date: NaiveDate,
        start: u32,
        limit: usize,
        is_disabled: bool,
    ) -> Vec<DayCell> {
        let next = self.math.next_month(month_year);
        let month = next.month.value as u32;
        let year = next.year.value;

        (start..start + limit as u32)
            .filter_map(|day| self.day_cell(year, month, day, selected_date, is_disabled))
            .collect()
    }

    fn day_cell(
        &self,
        year: i32,
        month: u32,
        day: u32,
        selected_date: NaiveDate,
        is_disabled: bool,
    ) -> Option<DayCell> {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            warn!(year, month, day, "invalid day components, skipping cell");
            return None;
        };

        let is_selected = self.math.is_same_day(date, selected_date);
        let label = self.formatter.day_label(date);
        Some(DayCell::new(date, label, is_disabled, is_selected))
    }
}
