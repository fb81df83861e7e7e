use std::cmp::Ordering;

use chrono::Datelike;

use crate::{math::CalendarMath, types::MonthYearSelection};

/// Whether stepping one month forward is permitted. Unrestricted navigation
/// is always allowed; otherwise only months strictly before the present one
/// may advance, comparing the year first and the month within the same
/// year. Moving up to the present month itself stays allowed.
pub fn can_navigate_forward(
    math: &CalendarMath,
    current: &MonthYearSelection,
    allow_future_navigation: bool,
) -> bool {
    if allow_future_navigation {
        return true;
    }

    let today = math.today();
    match current.year.value.cmp(&today.year()) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => (current.month.value as u32) < today.month(),
    }
}
