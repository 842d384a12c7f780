use chrono::{Datelike, NaiveDate, Weekday};

use super::{EventDaysMask, MonthDate};

pub const COLUMNS: u8 = 7;

/// How many week rows the grid reserves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowRule {
    /// 5 rows when the month starts on a Monday, 6 otherwise
    #[default]
    Compatible,
    /// Exactly as many rows as the month spans
    Exact,
}

/// Data used to describe the displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthContext {
    date: MonthDate,
    start_weekday: Weekday,
    days_in_month: u8,
    today: u8,
}

impl MonthContext {
    pub fn from_date(today: NaiveDate) -> Self {
        let date = MonthDate::new_from_date(today);
        Self {
            date,
            start_weekday: date.to_start_day_naive().weekday(),
            days_in_month: date.days_amount(),
            today: today.day() as u8,
        }
    }

    #[inline(always)]
    pub fn month_date(self) -> MonthDate {
        self.date
    }

    pub fn year(self) -> i32 {
        self.date.year()
    }

    /// Month number, 1 to 12
    pub fn month(self) -> u32 {
        self.date.month()
    }

    /// Weekday of the 1st, 1 = Monday .. 7 = Sunday
    pub fn first_weekday_offset(self) -> u8 {
        self.start_weekday.number_from_monday() as u8
    }

    pub fn days_in_month(self) -> u8 {
        self.days_in_month
    }

    /// Get `today` as a day number in this month
    pub fn today(self) -> u8 {
        self.today
    }

    pub fn row_count(self, rule: RowRule) -> u8 {
        match rule {
            RowRule::Compatible => {
                if self.start_weekday == Weekday::Mon {
                    5
                } else {
                    6
                }
            }
            RowRule::Exact => {
                let cells = self.first_weekday_offset() - 1 + self.days_in_month;
                cells.div_ceil(COLUMNS)
            }
        }
    }

    /// `(row, column)` of a 1-based day number
    pub fn cell_position(self, day: u8) -> (u8, u8) {
        let idx = self.first_weekday_offset() - 1 + day - 1;
        (idx / COLUMNS, idx % COLUMNS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub day_number: u8,
    pub row: u8,
    pub column: u8,
    pub has_event: bool,
    pub is_today: bool,
}

/// One month of day cells, ready to be laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    context: MonthContext,
    row_count: u8,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(context: MonthContext, rule: RowRule, event_days: EventDaysMask) -> Self {
        let days = context.days_in_month();
        let event_days = event_days.truncate(days);
        let cells = (1..=days)
            .map(|day_number| {
                let (row, column) = context.cell_position(day_number);
                GridCell {
                    day_number,
                    row,
                    column,
                    has_event: event_days.is_day1_set(day_number),
                    is_today: day_number == context.today(),
                }
            })
            .collect();
        Self {
            context,
            row_count: context.row_count(rule),
            cells,
        }
    }

    pub fn context(&self) -> MonthContext {
        self.context
    }

    pub fn row_count(&self) -> u8 {
        self.row_count
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }
}
