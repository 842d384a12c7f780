//! A bunch of utils for working with calendar stuff

pub mod calendar;
pub mod event_days;
mod month_date;

pub use calendar::{GridCell, MonthContext, MonthGrid, RowRule};
use chrono::Weekday;
pub use event_days::EventDaysMask;
pub use month_date::MonthDate;

pub const fn weekday_short_name(val: Weekday) -> &'static str {
    all_weekdays_short_en()[val.num_days_from_monday() as usize]
}

pub const fn all_weekdays() -> [Weekday; 7] {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
}

/// Two-letter column headers, Monday first
pub const fn all_weekdays_short_en() -> [&'static str; 7] {
    ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
}
