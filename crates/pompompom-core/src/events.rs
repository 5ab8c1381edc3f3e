use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in a session produces an Event.
/// The front end renders them; nothing in the core consumes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Time ran out or the user skipped ahead.
    PhaseChanged {
        from: Phase,
        to: Phase,
        completed_cycles: u64,
        skipped: bool,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// The active task earned a pomodoro.
    TaskCredited {
        index: usize,
        name: String,
        completed: u32,
        required: u32,
        at: DateTime<Utc>,
    },
    /// The active task hit its target and the next unfinished one took over.
    TaskAdvanced {
        index: usize,
        name: String,
        at: DateTime<Utc>,
    },
    AllTasksCompleted {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        remaining_secs: u64,
        total_secs: u64,
        running: bool,
        completed_cycles: u64,
        /// What the display shows next to the clock.
        caption: String,
        at: DateTime<Utc>,
    },
}
