//! Commit timestamp sources.
//!
//! Every commit the harness writes takes its author and committer time from a
//! [`Clock`]. The default [`SteppingClock`] hands out a fixed, strictly
//! increasing sequence so commit ordering never depends on the wall clock.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// 2020-01-01T00:00:00Z
const DEFAULT_START_SECONDS: i64 = 1_577_836_800;
const DEFAULT_STEP_SECONDS: i64 = 60;

pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The same instant for every commit.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// `start`, `start + step`, `start + 2*step`, ...
///
/// Past the representable range the clock stays pinned at
/// `DateTime::<Utc>::MAX_UTC` (or `MIN_UTC` for a negative step).
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    step_seconds: i64,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step_seconds: i64) -> Self {
        Self {
            start,
            step_seconds,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        TimeDelta::try_seconds(self.step_seconds.saturating_mul(tick))
            .and_then(|offset| self.start.checked_add_signed(offset))
            .unwrap_or(if self.step_seconds < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }
}

/// Serializable choice of [`Clock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimestampMode {
    System,
    Fixed {
        at: DateTime<Utc>,
    },
    Stepping {
        start: DateTime<Utc>,
        step_seconds: i64,
    },
}

impl Default for TimestampMode {
    fn default() -> Self {
        Self::Stepping {
            start: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(DEFAULT_START_SECONDS),
            step_seconds: DEFAULT_STEP_SECONDS,
        }
    }
}

impl TimestampMode {
    pub fn clock(&self) -> Box<dyn Clock> {
        match self {
            Self::System => Box::new(SystemClock),
            Self::Fixed { at } => Box::new(FixedClock(*at)),
            Self::Stepping {
                start,
                step_seconds,
            } => Box::new(SteppingClock::new(*start, *step_seconds)),
        }
    }
}
