use std::fmt;

/// Waiting period, in whole days, until a card is due again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval(i32);

impl Interval {
    pub fn from_days(days: i32) -> Self {
        Self(days.max(0))
    }

    pub fn days(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day(s)", self.0)
    }
}
