//! Clock access and fixed-offset localization.
//!
//! Every "now" the pipeline needs is read from a [`Clock`] passed in by the caller, so a render
//! can be frozen in time.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::error::{PanelError, Result};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the host clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed UTC offset added to every instant before it is displayed or compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalOffset(TimeDelta);

impl LocalOffset {
    pub const UTC: Self = Self(TimeDelta::zero());

    /// Returns `None` when the offset does not fit a [`TimeDelta`]
    pub fn from_seconds(seconds: i64) -> Option<Self> {
        TimeDelta::try_seconds(seconds).map(Self)
    }

    pub fn seconds(self) -> i64 {
        self.0.num_seconds()
    }

    /// Shift a UTC wall time into local wall time. `None` past the representable range.
    pub fn localize(self, utc: NaiveDateTime) -> Option<NaiveDateTime> {
        utc.checked_add_signed(self.0)
    }

    /// Current local wall time as seen through `clock`
    pub fn local_now<C: Clock + ?Sized>(self, clock: &C) -> Result<NaiveDateTime> {
        let utc = clock.now().naive_utc();
        self.localize(utc).ok_or_else(|| {
            PanelError::Config(format!(
                "offset of {} s moves {utc} out of range",
                self.seconds()
            ))
        })
    }
}

impl Default for LocalOffset {
    fn default() -> Self {
        Self::UTC
    }
}
