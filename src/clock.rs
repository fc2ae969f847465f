use time::{OffsetDateTime, UtcOffset};

/// Source of the reference instant against which cell availability is
/// evaluated.  The app re-reads the clock on every iteration of its event
/// loop, so a cell due to unlock today does so without a restart.
pub(crate) trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in the local offset captured at startup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub(crate) fn new(offset: UtcOffset) -> SystemClock {
        SystemClock { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// A clock pinned to a single instant, for `--date` runs and tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixedClock(OffsetDateTime);

impl FixedClock {
    pub(crate) fn new(at: OffsetDateTime) -> FixedClock {
        FixedClock(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
