use chrono::{Datelike, NaiveDate};

/// Date-to-text rules injected by the host. The engine only calls this to
/// populate cell labels and week range strings; it contains no formatting
/// rules of its own.
pub trait LabelFormatter {
    /// Accessibility-style label for one day, e.g. "Wednesday, August 3".
    fn day_label(&self, date: NaiveDate) -> String;

    /// Range label for a week. The start date is shortened when the range
    /// stays within one month.
    fn readable_range(&self, start: NaiveDate, end: NaiveDate) -> String;
}

/// chrono format strings used by [`DefaultLabelFormatter`].
#[derive(Debug, Clone)]
pub struct FormatterStyle {
    /// "Wednesday, August 3"
    pub weekday_label: &'static str,
    /// "3 Aug"
    pub day_month_label: &'static str,
    /// "3 Aug 2022"
    pub full_label: &'static str,
}

impl Default for FormatterStyle {
    fn default() -> Self {
        Self {
            weekday_label: "%A, %B %-d",
            day_month_label: "%-d %b",
            full_label: "%-d %b %Y",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DefaultLabelFormatter {
    style: FormatterStyle,
}

impl DefaultLabelFormatter {
    pub fn new(style: FormatterStyle) -> Self {
        Self { style }
    }
}

impl LabelFormatter for DefaultLabelFormatter {
    fn day_label(&self, date: NaiveDate) -> String {
        date.format(self.style.weekday_label).to_string()
    }

    fn readable_range(&self, start: NaiveDate, end: NaiveDate) -> String {
        if start.month() == end.month() && start.year() == end.year() {
            format!(
                "{} - {}",
                start.format(self.style.day_month_label),
                end.format(self.style.full_label)
            )
        } else {
            format!(
                "{} - {}",
                start.format(self.style.full_label),
                end.format(self.style.full_label)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::date;

    #[test]
    fn day_label_spells_out_weekday_and_month() {
        let formatter = DefaultLabelFormatter::default();
        assert_eq!(formatter.day_label(date(2022, 8, 3)), "Wednesday, August 3");
    }

    #[test]
    fn range_within_one_month_shortens_the_start() {
        let formatter = DefaultLabelFormatter::default();
        let range = formatter.readable_range(date(2022, 8, 3), date(2022, 8, 9));
        assert_eq!(range, "3 Aug - 9 Aug 2022");
    }

    #[test]
    fn range_across_months_uses_full_dates() {
        let formatter = DefaultLabelFormatter::default();
        let range = formatter.readable_range(date(2022, 7, 31), date(2022, 8, 6));
        assert_eq!(range, "31 Jul 2022 - 6 Aug 2022");
    }
}
