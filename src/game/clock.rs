use std::time::SystemTime;

use chrono::{Local, NaiveDate};

/// Source of wall-clock readings for daily seeds, completion flags and timestamps.
pub trait Clock {
    fn today(&self) -> NaiveDate;
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Always reports the same day and instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub today: NaiveDate,
    pub now: SystemTime,
}

impl FixedClock {
    pub fn on(today: NaiveDate) -> Self {
        Self {
            today,
            now: SystemTime::now(),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> SystemTime {
        self.now
    }
}
