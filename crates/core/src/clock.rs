//! Source of the current time and calendar date.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Provides "now" for timestamps and "today" for expiry arithmetic.
pub trait Clock {
    /// Current instant, stored on items as `addedAt` / `usedAt`.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the host's local timezone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock of the host machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a single instant and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self { now, today }
    }

    /// A clock whose "today" is the UTC date of `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: now.date_naive(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
