//! Injectable time source.
//!
//! Pure functions take the evaluation instant as an argument. Only the
//! service layer reads a [`Clock`], so tests can pin "now".

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Source of the current instant, in some time zone.
pub trait Clock {
    type Tz: TimeZone;

    /// The evaluation instant.
    fn now(&self) -> DateTime<Self::Tz>;

    /// The calendar day of [`Clock::now`] in the clock's own zone.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.now.clone()
    }
}
