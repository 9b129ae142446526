//! Time segment of a request path.
//!
//! The service accepts single instants, offsets relative to `now`, periods
//! (`<start>P<duration>:P<step>`), ranges (`<start>--<end>:P<step>`) and
//! comma-separated lists of any of these.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use std::fmt;

const NOW: &str = "now";

/// Everything that can go in the time segment.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSpec {
    Now,
    Tomorrow,
    Yesterday,
    /// Passed through verbatim, e.g. `now-1D` or `2024-01-01T00:00Z`.
    Raw(String),
    Instant(DateTime<Utc>),
    /// Offset from `now`; zero renders as `now`.
    Offset(TimeDelta),
    Period {
        start: DateTime<Utc>,
        duration: TimeDelta,
        step: TimeDelta,
    },
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: TimeDelta,
    },
    List(Vec<TimeSpec>),
}

impl TimeSpec {
    pub fn period(start: DateTime<Utc>, duration: TimeDelta, step: TimeDelta) -> Self {
        TimeSpec::Period {
            start,
            duration,
            step,
        }
    }

    pub fn range(start: DateTime<Utc>, end: DateTime<Utc>, step: TimeDelta) -> Self {
        TimeSpec::Range { start, end, step }
    }
}

impl From<DateTime<Utc>> for TimeSpec {
    fn from(t: DateTime<Utc>) -> Self {
        TimeSpec::Instant(t)
    }
}

impl From<TimeDelta> for TimeSpec {
    fn from(d: TimeDelta) -> Self {
        TimeSpec::Offset(d)
    }
}

impl From<Vec<TimeSpec>> for TimeSpec {
    fn from(v: Vec<TimeSpec>) -> Self {
        TimeSpec::List(v)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpec::Now => f.write_str(NOW),
            TimeSpec::Tomorrow => f.write_str("tomorrow"),
            TimeSpec::Yesterday => f.write_str("yesterday"),
            TimeSpec::Raw(s) => f.write_str(s),
            TimeSpec::Instant(t) => f.write_str(&format_time(t)),
            TimeSpec::Offset(d) => f.write_str(&format_offset(*d)),
            TimeSpec::Period {
                start,
                duration,
                step,
            } => write!(
                f,
                "{}P{}:P{}",
                format_time(start),
                format_duration(*duration),
                format_duration(*step)
            ),
            TimeSpec::Range { start, end, step } => write!(
                f,
                "{}--{}:P{}",
                format_time(start),
                format_time(end),
                format_duration(*step)
            ),
            TimeSpec::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

pub(crate) fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Returns `d / unit` when `d` is an exact multiple of `unit`.
fn exact_multiple(d: TimeDelta, unit: TimeDelta) -> Option<i64> {
    if d.subsec_nanos() != 0 {
        return None;
    }
    let (secs, unit) = (d.num_seconds(), unit.num_seconds());
    (secs % unit == 0).then_some(secs / unit)
}

fn format_offset(d: TimeDelta) -> String {
    if d.is_zero() {
        return NOW.to_string();
    }
    let sign = if d < TimeDelta::zero() { '-' } else { '+' };
    let d = d.abs();
    for (unit, suffix) in [(TimeDelta::hours(1), 'H'), (TimeDelta::minutes(1), 'M')] {
        if let Some(n) = exact_multiple(d, unit) {
            return format!("{}{}{}{}", NOW, sign, n, suffix);
        }
    }
    format!("{}{}{}S", NOW, sign, d.num_seconds())
}

pub(crate) fn format_duration(d: TimeDelta) -> String {
    // Zero is a multiple of everything; keep it on the seconds path.
    if d.is_zero() {
        return "T0S".to_string();
    }
    for (unit, prefix, suffix) in [
        (TimeDelta::weeks(1), "", 'W'),
        (TimeDelta::days(1), "", 'D'),
        (TimeDelta::hours(1), "T", 'H'),
        (TimeDelta::minutes(1), "T", 'M'),
    ] {
        if let Some(n) = exact_multiple(d, unit) {
            return format!("{}{}{}", prefix, n, suffix);
        }
    }
    format!("T{}S", d.num_seconds())
}
