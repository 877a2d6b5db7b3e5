//! Sources of "today".

use chrono::{Days, FixedOffset, NaiveDate, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Supplies the current calendar date in the ledger's timezone.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Wall clock pinned to one fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedZoneClock {
    offset: FixedOffset,
}

impl FixedZoneClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Clock for FixedZoneClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    date: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner) = date;
    }

    /// Move forward by `days` calendar days.
    pub fn advance(&self, days: u64) {
        let mut d = self.date.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = d.checked_add_days(Days::new(days)) {
            *d = next;
        }
    }

    /// Move backward by `days` calendar days.
    pub fn rewind(&self, days: u64) {
        let mut d = self.date.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = d.checked_sub_days(Days::new(days)) {
            *d = prev;
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
