//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads or read the clock - the caller is responsible for calling `tick()`
//! once per second while the session is live.
//!
//! ## State Transitions
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work
//! ```
//!
//! Pause is a flag that applies to any phase.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(schedule);
//! engine.start();
//! // Once per second:
//! if let Some(transition) = engine.tick() { /* phase changed */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::schedule::{Phase, Schedule};
use crate::events::Event;

/// A phase change produced by `tick()` running out or by `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Work phases completed since start or the last reset, after this transition.
    pub completed_cycles: u64,
    /// True when forced by `advance()` before the time ran out.
    pub skipped: bool,
}

impl Transition {
    /// A break just ended and work begins.
    pub fn enters_work(&self) -> bool {
        self.from.is_break() && self.to == Phase::Work
    }

    pub fn to_event(&self) -> Event {
        Event::PhaseChanged {
            from: self.from,
            to: self.to,
            completed_cycles: self.completed_cycles,
            skipped: self.skipped,
            at: Utc::now(),
        }
    }
}

/// Core timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    schedule: Schedule,
    phase: Phase,
    /// Remaining time in seconds for the current phase.
    remaining_secs: u64,
    running: bool,
    completed_cycles: u64,
}

impl TimerEngine {
    /// Create a paused engine at the start of a work phase.
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            phase: Phase::Work,
            remaining_secs: schedule.duration_secs(Phase::Work),
            running: false,
            completed_cycles: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn total_secs(&self) -> u64 {
        self.schedule.duration_secs(self.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerResumed {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Flip the running flag. Phase and remaining time are untouched.
    pub fn toggle_pause(&mut self) -> Event {
        self.running = !self.running;
        let (phase, remaining_secs, at) = (self.phase, self.remaining_secs, Utc::now());
        if self.running {
            Event::TimerResumed {
                phase,
                remaining_secs,
                at,
            }
        } else {
            Event::TimerPaused {
                phase,
                remaining_secs,
                at,
            }
        }
    }

    /// Force the next phase now, whatever time is left.
    pub fn advance(&mut self) -> Transition {
        let skipped = self.remaining_secs > 0;
        self.transition(skipped)
    }

    /// Back to the first work phase with a fresh cycle count. Leaves the timer paused.
    pub fn reset(&mut self) -> Event {
        self.phase = Phase::Work;
        self.remaining_secs = self.schedule.duration_secs(Phase::Work);
        self.completed_cycles = 0;
        self.running = false;
        Event::TimerReset { at: Utc::now() }
    }

    /// Swap in new durations. The cycle restarts at work; the running flag is kept.
    pub fn set_schedule(&mut self, schedule: Schedule) {
        let running = self.running;
        self.schedule = schedule;
        self.reset();
        self.running = running;
    }

    /// Call once per second. Returns the transition when the phase runs out.
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.transition(false));
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn transition(&mut self, skipped: bool) -> Transition {
        let from = self.phase;
        let to = match from {
            Phase::Work => {
                self.completed_cycles += 1;
                self.schedule.break_after(self.completed_cycles)
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.phase = to;
        self.remaining_secs = self.schedule.duration_secs(to);
        tracing::debug!(%from, %to, cycles = self.completed_cycles, skipped, "phase transition");
        Transition {
            from,
            to,
            completed_cycles: self.completed_cycles,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seconds(work: u64, short: u64, long: u64, cycles: u64) -> Schedule {
        Schedule {
            work_secs: work,
            short_break_secs: short,
            long_break_secs: long,
            cycles_before_long_break: cycles,
        }
    }

    #[test]
    fn start_pause_resume() {
        let mut engine = TimerEngine::new(Schedule::default());
        assert!(!engine.is_running());

        assert!(engine.start().is_some());
        assert!(engine.is_running());
        assert!(engine.start().is_none());

        assert!(engine.pause().is_some());
        assert!(!engine.is_running());
        assert!(engine.pause().is_none());

        assert!(engine.resume().is_some());
        assert!(engine.is_running());
    }

    #[test]
    fn tick_counts_down_only_while_running() {
        let mut engine = TimerEngine::new(seconds(10, 5, 7, 4));
        engine.tick();
        assert_eq!(engine.remaining_secs(), 10);

        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.remaining_secs(), 8);
    }

    #[test]
    fn running_out_moves_to_break_and_resets_remaining() {
        let mut engine = TimerEngine::new(seconds(2, 5, 7, 4));
        engine.start();
        assert!(engine.tick().is_none());
        let t = engine.tick().expect("work should end");
        assert_eq!(t.from, Phase::Work);
        assert_eq!(t.to, Phase::ShortBreak);
        assert!(!t.skipped);
        assert_eq!(engine.remaining_secs(), 5);
        assert_eq!(engine.completed_cycles(), 1);
        assert!(engine.is_running());
    }

    #[test]
    fn advance_skips_regardless_of_remaining_time() {
        let mut engine = TimerEngine::new(Schedule::default());
        let t = engine.advance();
        assert!(t.skipped);
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.completed_cycles(), 1);

        let t = engine.advance();
        assert!(t.enters_work());
        assert_eq!(engine.phase(), Phase::Work);
        // Leaving a break does not count a cycle.
        assert_eq!(engine.completed_cycles(), 1);
    }

    #[test]
    fn advance_works_while_paused() {
        let mut engine = TimerEngine::new(Schedule::default());
        engine.advance();
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert!(!engine.is_running());
    }

    #[test]
    fn reset_goes_to_beginning() {
        let mut engine = TimerEngine::new(Schedule::default());
        engine.start();
        engine.advance();
        engine.advance();
        engine.advance();
        engine.reset();
        assert_eq!(engine.phase(), Phase::Work);
        assert_eq!(engine.completed_cycles(), 0);
        assert_eq!(engine.remaining_secs(), 25 * 60);
        assert!(!engine.is_running());
    }

    #[test]
    fn set_schedule_restarts_cycle_and_keeps_running_flag() {
        let mut engine = TimerEngine::new(Schedule::default());
        engine.start();
        engine.advance();
        engine.set_schedule(Schedule::from_minutes(50, 10, 30, 2));
        assert_eq!(engine.phase(), Phase::Work);
        assert_eq!(engine.remaining_secs(), 50 * 60);
        assert!(engine.is_running());
    }

    #[test]
    fn progress_within_phase() {
        let mut engine = TimerEngine::new(seconds(4, 1, 1, 4));
        engine.start();
        engine.tick();
        assert!((engine.phase_progress() - 0.25).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn nth_break_is_long(
            work in 1u64..5,
            short in 1u64..5,
            long in 1u64..5,
            cycles in 1u64..8,
            rounds in 1u64..4,
        ) {
            let mut engine = TimerEngine::new(seconds(work, short, long, cycles));
            engine.start();
            let mut breaks = Vec::new();
            // Tick through `rounds` full long-break cycles.
            while breaks.len() < (cycles * rounds) as usize {
                if let Some(t) = engine.tick() {
                    if t.to.is_break() {
                        breaks.push(t.to);
                    }
                }
            }
            for (i, phase) in breaks.iter().enumerate() {
                let nth = i as u64 + 1;
                let expected = if nth % cycles == 0 { Phase::LongBreak } else { Phase::ShortBreak };
                prop_assert_eq!(*phase, expected);
            }
        }

        #[test]
        fn pause_resume_preserves_phase_and_time(skips in 0usize..6, ticks in 0u64..30) {
            let mut engine = TimerEngine::new(seconds(40, 40, 40, 3));
            engine.start();
            for _ in 0..skips {
                engine.advance();
            }
            for _ in 0..ticks {
                engine.tick();
            }
            let (phase, remaining) = (engine.phase(), engine.remaining_secs());
            engine.toggle_pause();
            engine.tick();
            engine.toggle_pause();
            prop_assert_eq!(engine.phase(), phase);
            prop_assert_eq!(engine.remaining_secs(), remaining);
            prop_assert!(engine.is_running());
        }
    }
}
