use crate::gate::is_available;
use std::collections::HashSet;
use time::{Date, OffsetDateTime};

/// The set of cells the user currently has open.  Session-local: created
/// empty, never persisted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RevealState {
    open: HashSet<Date>,
}

impl RevealState {
    pub(crate) fn new() -> RevealState {
        RevealState::default()
    }

    pub(crate) fn is_open(&self, date: Date) -> bool {
        self.open.contains(&date)
    }

    /// Flips the open/closed state of `date`, provided the date is available
    /// at the instant `at`.  Toggling an unavailable date is a deliberate
    /// no-op, not an error.  Each date toggles independently of every other.
    pub(crate) fn toggle(&mut self, date: Date, at: OffsetDateTime) -> Toggle {
        if !is_available(date, at) {
            Toggle::Ignored
        } else if self.open.remove(&date) {
            Toggle::Closed
        } else {
            self.open.insert(date);
            Toggle::Opened
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Toggle {
    Opened,
    Closed,
    Ignored,
}
