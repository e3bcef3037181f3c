//! Epochs, closed time spans, and uniform sampling over a span.
//!
//! Epochs are stored as integer nanoseconds past J2000 in whatever time
//! system the ephemeris was written in. No time-scale conversion happens
//! here: two epochs are only comparable if they share a time system, which
//! the segment metadata guarantees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const NANOS_PER_SEC: i128 = 1_000_000_000;
const SECS_PER_DAY: i128 = 86_400;
const NANOS_PER_DAY: i128 = SECS_PER_DAY * NANOS_PER_SEC;

/// An instant in time, nanoseconds since J2000 (2000-01-01T12:00:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch {
    ns: i128,
}

impl Epoch {
    // ── Constructors ──────────────────────────────────────────────

    /// Create an Epoch from raw nanoseconds since J2000.
    pub const fn from_ns(ns: i128) -> Self {
        Self { ns }
    }

    /// Create an Epoch from seconds since J2000.
    pub fn from_seconds(secs: f64) -> Self {
        Self {
            ns: (secs * NANOS_PER_SEC as f64).round() as i128,
        }
    }

    /// Create an Epoch from a calendar date and time of day.
    ///
    /// The calendar is read in the epoch's own time system; no leap-second
    /// table is applied.
    pub fn from_calendar(year: i32, month: u8, day: u8, hour: u8, min: u8, sec: f64) -> Self {
        let days = calendar_to_j2000_days(year, month, day);
        let time_of_day_ns = (hour as i128) * 3_600 * NANOS_PER_SEC
            + (min as i128) * 60 * NANOS_PER_SEC
            + (sec * NANOS_PER_SEC as f64).round() as i128;

        // J2000 is at noon
        Self {
            ns: days * NANOS_PER_DAY - 12 * 3_600 * NANOS_PER_SEC + time_of_day_ns,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────

    /// Raw nanoseconds since J2000.
    pub const fn as_ns(&self) -> i128 {
        self.ns
    }

    /// Seconds since J2000 (floating point).
    pub fn to_seconds(&self) -> f64 {
        self.ns as f64 / NANOS_PER_SEC as f64
    }

    // ── Arithmetic ────────────────────────────────────────────────

    /// Duration between two epochs in seconds.
    pub fn duration_since(&self, other: &Epoch) -> f64 {
        (self.ns - other.ns) as f64 / NANOS_PER_SEC as f64
    }

    /// Add seconds to this epoch.
    pub fn add_seconds(&self, secs: f64) -> Self {
        Self {
            ns: self.ns + (secs * NANOS_PER_SEC as f64).round() as i128,
        }
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Epoch({:.9} s past J2000)", self.to_seconds())
    }
}

impl std::ops::Sub for Epoch {
    type Output = f64;
    /// Returns duration in seconds.
    fn sub(self, rhs: Self) -> f64 {
        self.duration_since(&rhs)
    }
}

/// A span was built with its bounds reversed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Span start {start} is after stop {stop}")]
pub struct InvalidSpan {
    pub start: Epoch,
    pub stop: Epoch,
}

/// Closed interval of epochs, `start <= stop`.
///
/// "No interval" is expressed as `Option<Span>::None`, which is what
/// [`Span::overlap`] returns for disjoint spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    start: Epoch,
    stop: Epoch,
}

impl Span {
    pub fn new(start: Epoch, stop: Epoch) -> Result<Self, InvalidSpan> {
        if start > stop {
            return Err(InvalidSpan { start, stop });
        }
        Ok(Self { start, stop })
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn stop(&self) -> Epoch {
        self.stop
    }

    /// Intersection of two spans. `None` when they share no epoch.
    pub fn overlap(&self, other: &Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let stop = self.stop.min(other.stop);
        (start <= stop).then_some(Span { start, stop })
    }

    /// Closed-interval membership.
    pub fn contains(&self, epoch: Epoch) -> bool {
        self.start <= epoch && epoch <= self.stop
    }

    /// Uniformly spaced epochs covering the span, bounds included.
    ///
    /// Returns `None` if `step_secs` is not finite or rounds to a
    /// non-positive number of nanoseconds. Steps longer than the span yield
    /// just its two bounds.
    pub fn range(&self, step_secs: f64) -> Option<TimeRange> {
        if !step_secs.is_finite() {
            return None;
        }
        let step = step_secs * NANOS_PER_SEC as f64;
        let max_step_ns = self.stop.ns - self.start.ns + 1;
        let step_ns = if step >= max_step_ns as f64 {
            max_step_ns
        } else {
            step.round() as i128
        };
        if step_ns <= 0 {
            return None;
        }
        Some(TimeRange {
            span: *self,
            step_ns,
            index: 0,
            done: false,
        })
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}

/// Iterator over `start, start + step, ...` strictly before `stop`,
/// followed by `stop` itself.
#[derive(Debug, Clone)]
pub struct TimeRange {
    span: Span,
    step_ns: i128,
    index: i128,
    done: bool,
}

impl TimeRange {
    /// Epoch of the next interior sample, `None` on overflow.
    fn offset_ns(&self) -> Option<i128> {
        self.index
            .checked_mul(self.step_ns)
            .and_then(|off| self.span.start.ns.checked_add(off))
    }
}

impl Iterator for TimeRange {
    type Item = Epoch;

    fn next(&mut self) -> Option<Epoch> {
        if self.done {
            return None;
        }
        match self.offset_ns() {
            Some(ns) if ns < self.span.stop.ns => {
                self.index += 1;
                Some(Epoch::from_ns(ns))
            }
            _ => {
                self.done = true;
                Some(self.span.stop)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining_ns = self
            .offset_ns()
            .map_or(0, |ns| self.span.stop.ns.saturating_sub(ns));
        let interior = if remaining_ns > 0 {
            (remaining_ns - 1) / self.step_ns + 1
        } else {
            0
        };
        let n = usize::try_from(interior + 1).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl std::iter::FusedIterator for TimeRange {}

/// Convert a calendar date to days since J2000 (2000-01-01).
/// Valid for Gregorian dates after 1582-10-15.
fn calendar_to_j2000_days(year: i32, month: u8, day: u8) -> i128 {
    // Meeus, Astronomical Algorithms, Ch.7
    let y = if month <= 2 { year - 1 } else { year } as i128;
    let m = if month <= 2 {
        month as i128 + 12
    } else {
        month as i128
    };
    let d = day as i128;

    let a = y / 100;
    let b = 2 - a + a / 4;

    let jd_noon = (365.25 * (y + 4716) as f64).floor() as i128
        + (30.6001 * (m + 1) as f64).floor() as i128
        + d
        + b
        - 1524;

    // J2000 = JD 2451545
    jd_noon - 2_451_545
}
