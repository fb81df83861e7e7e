//! Month-grid calendar engine: fixed 6x7 page generation, month navigation
//! and selection state for calendar widgets, decoupled from any rendering
//! layer. Locale, "now" and label formatting come in through the
//! [`CalendarProvider`] and [`LabelFormatter`] traits.

pub mod engine;
pub mod format;
pub mod generator;
pub mod math;
pub mod navigation;
pub mod picker;
pub mod types;

pub use engine::{CalendarEngine, CalendarEvent, EngineState, PageSet};
pub use format::{DefaultLabelFormatter, FormatterStyle, LabelFormatter};
pub use generator::{GRID_COLUMNS, GRID_ROWS, GridGenerator};
pub use math::{CalendarMath, CalendarProvider, LocalProvider};
pub use picker::PickerDataSource;
pub use types::{CalendarOptions, DayCell, MonthYearSelection, PickerEntry, RowState, WeekRow};
