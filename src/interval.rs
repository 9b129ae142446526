use chrono::TimeDelta;
use std::fmt;

/// Accumulation or aggregation window of a parameter, e.g. `precip_1h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    secs: i64,
}

impl Interval {
    pub fn new(d: TimeDelta) -> Self {
        Self {
            secs: d.num_seconds(),
        }
    }

    pub const fn minutes(n: i64) -> Self {
        Self { secs: n * 60 }
    }

    pub const fn hours(n: i64) -> Self {
        Self { secs: n * 3600 }
    }

    pub const MIN_5: Interval = Interval::minutes(5);
    pub const MIN_10: Interval = Interval::minutes(10);
    pub const MIN_15: Interval = Interval::minutes(15);
    pub const MIN_30: Interval = Interval::minutes(30);
    pub const H_1: Interval = Interval::hours(1);
    pub const H_3: Interval = Interval::hours(3);
    pub const H_6: Interval = Interval::hours(6);
    pub const H_12: Interval = Interval::hours(12);
    pub const H_24: Interval = Interval::hours(24);

    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(self.secs)
    }
}

impl From<TimeDelta> for Interval {
    fn from(d: TimeDelta) -> Self {
        Self::new(d)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.secs % 3600 == 0 {
            write!(f, "{}h", self.secs / 3600)
        } else {
            write!(f, "{}min", self.secs / 60)
        }
    }
}
