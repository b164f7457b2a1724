use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, Utc};

/// Source of "today" and of the local wall time used for display.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Converts a stored UTC instant into the wall time shown to users.
    fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime;
}

/// Reads the host clock and time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&Local).naive_local()
    }
}

/// A clock pinned to one calendar day, used by tests and tooling.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            offset: Utc.fix(),
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }
}
