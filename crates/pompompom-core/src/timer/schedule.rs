use serde::{Deserialize, Serialize};
use std::fmt;

/// The interval the timer is currently counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        !matches!(self, Phase::Work)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase durations and the long-break interval, in seconds.
///
/// Built from [`Settings::schedule`](crate::Settings::schedule). Every field is
/// expected to be at least 1; the settings layer rejects zero before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub work_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
    /// Work phases completed before a long break.
    pub cycles_before_long_break: u64,
}

impl Schedule {
    /// Build a schedule from durations in minutes.
    ///
    /// Uses saturating arithmetic so absurd inputs clamp instead of overflowing.
    pub fn from_minutes(work: u64, short_break: u64, long_break: u64, cycles: u64) -> Self {
        Self {
            work_secs: work.saturating_mul(60),
            short_break_secs: short_break.saturating_mul(60),
            long_break_secs: long_break.saturating_mul(60),
            cycles_before_long_break: cycles,
        }
    }

    pub fn duration_secs(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }

    /// The break that follows the `completed_cycles`-th work phase.
    pub fn break_after(&self, completed_cycles: u64) -> Phase {
        let every = self.cycles_before_long_break.max(1);
        if completed_cycles % every == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::from_minutes(25, 5, 15, 4)
    }
}
