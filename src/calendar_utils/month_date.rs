use chrono::{Datelike, Days, Months, NaiveDate};

/// A calendar month, stored as its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDate(NaiveDate);

impl MonthDate {
    pub fn new_from_date(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 to 12
    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub const fn to_start_day_naive(self) -> NaiveDate {
        self.0
    }

    /// Get the amount of days in this month
    pub fn days_amount(self) -> u8 {
        let start = self.0;
        match start.checked_add_months(Months::new(1)) {
            Some(end) => end.signed_duration_since(start).num_days() as u8,
            // Only the very last representable month can fail here, and it is a December
            None => 31,
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::new_from_date(date) == self
    }
}
