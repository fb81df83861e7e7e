use std::rc::Rc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    format::LabelFormatter,
    generator::GridGenerator,
    math::{CalendarMath, CalendarProvider},
    navigation,
    types::{CalendarOptions, DayCell, MonthYearSelection, RowState, WeekRow},
};

/// Engine lifecycle. `Paging` covers the window between a navigation call
/// and the presentation layer's settle signal ([`CalendarEngine::refresh`]),
/// during which the adjacent page stands in for the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Displaying,
    Paging,
}

/// Typed change notifications delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEvent {
    /// A cell of the visible grid was tapped.
    DaySelected(DayCell),
    /// A jump-to-date request was applied.
    DateSelected(NaiveDate),
    /// The picker committed a new month/year.
    MonthYearChanged(MonthYearSelection),
}

/// The three-page buffer behind swipe paging: the displayed month plus its
/// neighbors, regenerated together.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pub previous: Vec<WeekRow>,
    pub current: Vec<WeekRow>,
    pub next: Vec<WeekRow>,
}

impl PageSet {
    /// Page for offset -1, 0 or +1.
    pub fn page(&self, offset: i8) -> Option<&[WeekRow]> {
        match offset {
            -1 => Some(&self.previous),
            0 => Some(&self.current),
            1 => Some(&self.next),
            _ => None,
        }
    }
}

type Listener = Box<dyn Fn(&CalendarEvent)>;

/// Owns the displayed month, the selected date and the page buffer. All
/// mutation is synchronous; consumers get immutable copies or borrows.
pub struct CalendarEngine {
    math: CalendarMath,
    generator: GridGenerator,
    formatter: Rc<dyn LabelFormatter>,
    options: CalendarOptions,

    state: EngineState,
    selected_date: NaiveDate,
    month_year: MonthYearSelection,
    pages: PageSet,
    listeners: Vec<Listener>,
}

impl CalendarEngine {
    pub fn new(
        provider: Rc<dyn CalendarProvider>,
        formatter: Rc<dyn LabelFormatter>,
        options: CalendarOptions,
        initial_date: NaiveDate,
    ) -> Self {
        let math = CalendarMath::new(provider, options.week_start);
        let generator = GridGenerator::new(
            math.clone(),
            Rc::clone(&formatter),
            options.filler_dates_enabled,
        );
        let month_year = math.month_year_for(initial_date);

        let mut engine = Self {
            math,
            generator,
            formatter,
            options,
            state: EngineState::Idle,
            selected_date: initial_date,
            month_year,
            pages: PageSet::default(),
            listeners: Vec::new(),
        };
        engine.regenerate();
        engine
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn month_year(&self) -> &MonthYearSelection {
        &self.month_year
    }

    /// Combined display title of the displayed month, e.g. "September 2024".
    pub fn month_year_title(&self) -> String {
        self.month_year.title()
    }

    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    /// Page for offset -1, 0 or +1.
    pub fn page(&self, offset: i8) -> Option<&[WeekRow]> {
        self.pages.page(offset)
    }

    /// Short weekday symbols in grid column order.
    pub fn weekday_symbols(&self) -> Vec<String> {
        self.math.weekday_symbols()
    }

    pub fn can_navigate_forward(&self) -> bool {
        navigation::can_navigate_forward(
            &self.math,
            &self.month_year,
            self.options.allow_future_navigation,
        )
    }

    pub fn subscribe(&mut self, listener: impl Fn(&CalendarEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Jump to an arbitrary date: the displayed month follows the date, all
    /// three pages are rebuilt and the jump is reported.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.month_year = self.math.month_year_for(date);
        self.selected_date = date;
        self.regenerate();
        self.state = EngineState::Displaying;
        self.emit(CalendarEvent::DateSelected(date));
    }

    /// In-grid tap: flips selection to `cell` and clears every other cell
    /// across all three pages, without rebuilding them. Re-selecting the
    /// same cell leaves the grid unchanged.
    pub fn select_cell(&mut self, cell: &DayCell) {
        for page in [
            &mut self.pages.previous,
            &mut self.pages.current,
            &mut self.pages.next,
        ] {
            for row in page.iter_mut() {
                let days = row
                    .days
                    .iter()
                    .map(|d| d.with_selected(d.id == cell.id))
                    .collect();
                *row = row.with_days(days);
            }
        }

        self.selected_date = cell.date;
        self.state = EngineState::Displaying;
        self.emit(CalendarEvent::DaySelected(cell.clone()));
    }

    /// Step to the previous month. Pages are not rebuilt until the
    /// presentation layer settles the transition and calls [`refresh`].
    ///
    /// [`refresh`]: CalendarEngine::refresh
    pub fn navigate_previous(&mut self) {
        self.month_year = self.math.previous_month(&self.month_year);
        self.state = EngineState::Paging;
    }

    /// Step to the next month, unless the future-navigation policy forbids
    /// it. Returns whether the step happened; a refused step changes
    /// nothing.
    pub fn navigate_next(&mut self) -> bool {
        if !self.can_navigate_forward() {
            return false;
        }

        self.month_year = self.math.next_month(&self.month_year);
        self.state = EngineState::Paging;
        true
    }

    /// Rebuild all three pages for the displayed month. Called once a
    /// paging transition settles; afterwards the page set again corresponds
    /// to (previous, current, next) of the displayed month.
    pub fn refresh(&mut self) {
        self.regenerate();
        self.state = EngineState::Displaying;
    }

    /// Replace the state of the first row containing `date`, searching the
    /// previous, current and next page in order.
    pub fn update_row_state(&mut self, date: NaiveDate, state: RowState) {
        let math = self.math.clone();
        for page in [
            &mut self.pages.previous,
            &mut self.pages.current,
            &mut self.pages.next,
        ] {
            for row in page.iter_mut() {
                if row.days.iter().any(|d| math.is_same_day(d.date, date)) {
                    *row = row.with_state(state);
                    return;
                }
            }
        }
    }

    /// Picker feedback path: show the committed month/year as if the user
    /// had jumped to its first day.
    pub fn apply_month_year(&mut self, selection: MonthYearSelection) {
        let Some(date) = selection.first_day() else {
            warn!(
                month = selection.month.value,
                year = selection.year.value,
                "picker selection is not a valid month, ignoring"
            );
            return;
        };

        self.month_year = selection.clone();
        self.selected_date = date;
        self.regenerate();
        self.state = EngineState::Displaying;
        self.emit(CalendarEvent::MonthYearChanged(selection));
    }

    /// Range label of the active week of the current page, if any row holds
    /// the selection.
    pub fn readable_active_date_range(&self) -> Option<String> {
        self.pages
            .current
            .iter()
            .find(|r| r.is_row_active())
            .and_then(|r| r.readable_date_range(self.formatter.as_ref()))
    }

    /// Dates of the active week, falling back to the week containing today.
    pub fn active_week_days(&self) -> Vec<NaiveDate> {
        let row = self
            .pages
            .current
            .iter()
            .find(|r| r.is_row_active())
            .or_else(|| {
                self.pages
                    .current
                    .iter()
                    .find(|r| r.has_current_date(&self.math))
            });

        match row {
            Some(row) => row.days.iter().map(|d| d.date).collect(),
            None => Vec::new(),
        }
    }

    fn emit(&self, event: CalendarEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    fn regenerate(&mut self) {
        debug!(
            month = self.month_year.month.value,
            year = self.month_year.year.value,
            "rebuilding page set"
        );

        let previous = self.math.previous_month(&self.month_year);
        let next = self.math.next_month(&self.month_year);
        self.pages = PageSet {
            previous: self.generate_page(&previous),
            current: self.generate_page(&self.month_year),
            next: self.generate_page(&next),
        };
    }

    fn generate_page(&self, month_year: &MonthYearSelection) -> Vec<WeekRow> {
        self.generator.generate(
            month_year,
            self.selected_date,
            self.options.future_weeks_allowed,
            self.options.future_dates_allowed,
        )
    }
}
