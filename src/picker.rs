use chrono::Datelike;

use crate::{
    math::CalendarMath,
    types::{MonthYearSelection, PickerEntry},
};

type Listener = Box<dyn Fn(&MonthYearSelection)>;

/// Data behind the month/year picker: the twelve months, a bounded year
/// window around today, and the shared selection. Rendering is the host's
/// job; subscribers get the full updated selection whenever either
/// sub-picker commits a value.
pub struct PickerDataSource {
    month_year: MonthYearSelection,
    months: Vec<PickerEntry>,
    years: Vec<PickerEntry>,
    is_enabled: bool,
    listeners: Vec<Listener>,
}

impl PickerDataSource {
    pub fn new(
        math: &CalendarMath,
        month_year: MonthYearSelection,
        years_back: u32,
        years_forward: u32,
        is_enabled: bool,
    ) -> Self {
        let months = (1..=12).map(|m| math.month_entry(m)).collect();

        let current_year = math.today().year();
        let first = current_year - years_back as i32;
        let last = current_year + years_forward as i32;
        let years = (first..=last).map(|y| math.year_entry(y)).collect();

        Self {
            month_year,
            months,
            years,
            is_enabled,
            listeners: Vec::new(),
        }
    }

    pub fn months(&self) -> &[PickerEntry] {
        &self.months
    }

    pub fn years(&self) -> &[PickerEntry] {
        &self.years
    }

    pub fn month_year(&self) -> &MonthYearSelection {
        &self.month_year
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn subscribe(&mut self, listener: impl Fn(&MonthYearSelection) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Commit a new month from the month sub-picker.
    pub fn select_month(&mut self, month: PickerEntry) {
        self.month_year = MonthYearSelection::new(month, self.month_year.year.clone());
        self.notify();
    }

    /// Commit a new year from the year sub-picker.
    pub fn select_year(&mut self, year: PickerEntry) {
        self.month_year = MonthYearSelection::new(self.month_year.month.clone(), year);
        self.notify();
    }

    /// Engine-to-picker synchronization after navigation. Does not notify,
    /// so the engine never hears its own updates back.
    pub fn sync(&mut self, current: MonthYearSelection) {
        self.month_year = current;
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.month_year);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        engine::CalendarEngine,
        format::DefaultLabelFormatter,
        testutil::{date, fixed_math, FixedProvider},
        types::CalendarOptions,
    };
    use chrono::Weekday;

    fn picker(today: chrono::NaiveDate) -> PickerDataSource {
        let math = fixed_math(today, Weekday::Sun);
        let month_year = math.month_year_for(today);
        PickerDataSource::new(&math, month_year, 5, 10, true)
    }

    #[test]
    fn twelve_months_in_order() {
        let picker = picker(date(2024, 8, 14));

        let months = picker.months();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].title, "January");
        assert_eq!(months[0].value, 1);
        assert_eq!(months[11].title, "December");
        assert_eq!(months[11].value, 12);
    }

    #[test]
    fn year_window_is_contiguous_and_asymmetric() {
        let picker = picker(date(2024, 8, 14));

        let years = picker.years();
        assert_eq!(years.len(), 16);
        assert_eq!(years.first().unwrap().value, 2019);
        assert_eq!(years.last().unwrap().value, 2034);
        for pair in years.windows(2) {
            assert_eq!(pair[1].value, pair[0].value + 1);
        }
    }

    #[test]
    fn committing_a_sub_picker_notifies_with_the_full_selection() {
        let mut picker = picker(date(2024, 8, 14));
        let seen: Rc<RefCell<Vec<MonthYearSelection>>> = Rc::default();

        let sink = Rc::clone(&seen);
        picker.subscribe(move |selection| sink.borrow_mut().push(selection.clone()));

        let march = picker.months()[2].clone();
        picker.select_month(march);
        let year_2026 = picker
            .years()
            .iter()
            .find(|y| y.value == 2026)
            .unwrap()
            .clone();
        picker.select_year(year_2026);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].title(), "March 2024");
        assert_eq!(seen[1].title(), "March 2026");
        assert_eq!(picker.month_year().title(), "March 2026");
    }

    #[test]
    fn sync_updates_the_selection_silently() {
        let mut picker = picker(date(2024, 8, 14));
        let seen: Rc<RefCell<Vec<MonthYearSelection>>> = Rc::default();

        let sink = Rc::clone(&seen);
        picker.subscribe(move |selection| sink.borrow_mut().push(selection.clone()));

        let math = fixed_math(date(2024, 8, 14), Weekday::Sun);
        picker.sync(math.month_year_for(date(2024, 9, 1)));

        assert!(seen.borrow().is_empty());
        assert_eq!(picker.month_year().title(), "September 2024");
    }

    #[test]
    fn picker_events_drive_the_engine() {
        let today = date(2024, 8, 14);
        let mut picker = picker(today);
        let engine = Rc::new(RefCell::new(CalendarEngine::new(
            Rc::new(FixedProvider(today)),
            Rc::new(DefaultLabelFormatter::default()),
            CalendarOptions::default(),
            today,
        )));

        let driven = Rc::clone(&engine);
        picker.subscribe(move |selection| driven.borrow_mut().apply_month_year(selection.clone()));

        let june = picker.months()[5].clone();
        picker.select_month(june);

        let engine = engine.borrow();
        assert_eq!(engine.month_year_title(), "June 2024");
        assert_eq!(engine.selected_date(), date(2024, 6, 1));
    }
}
