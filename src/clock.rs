use chrono::{Local, NaiveDateTime};

/// Source of the local wall-clock time used for commit messages
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The host's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
