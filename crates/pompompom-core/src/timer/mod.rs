mod engine;
mod schedule;

pub use engine::{TimerEngine, Transition};
pub use schedule::{Phase, Schedule};
