use chrono::{Datelike, NaiveDate};

use super::MonthDate;

/// Bit `n` is set when day `n + 1` of the month has at least one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDaysMask(u32);

impl EventDaysMask {
    /// Collect the days of `month` that appear in `dates`. Dates in other months are ignored.
    pub fn from_dates<I>(month: MonthDate, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates
            .into_iter()
            .filter(|date| month.contains(*date))
            .fold(Self::default(), |mask, date| mask.with_day0(date.day0() as u8))
    }

    pub const fn with_day0(self, day: u8) -> Self {
        Self(self.0 | (1_u32 << day))
    }

    pub const fn truncate(self, days: u8) -> Self {
        Self(self.0 & ((1_u64 << days) - 1) as u32)
    }

    pub const fn is_day0_set(self, day: u8) -> bool {
        ((self.0 >> day) & 0b1) != 0
    }

    pub const fn is_day1_set(self, day: u8) -> bool {
        self.is_day0_set(day - 1)
    }
}
