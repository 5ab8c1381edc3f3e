//! Tasks and the ordered registry the timer credits pomodoros to.

mod registry;

pub use registry::{LoadReport, TaskRegistry, TASKS_HEADER, TASKS_HEADER_WITH_PROGRESS};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// One line of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Pomodoros the task is expected to take. Always at least 1.
    pub required: u32,
    /// Pomodoros credited so far. May exceed `required`.
    #[serde(default)]
    pub completed: u32,
}

impl Task {
    /// Create a task with nothing completed yet.
    ///
    /// The name is trimmed; it must not be empty and `required` must be positive.
    pub fn new(name: &str, required: u32) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        validate_required(required)?;
        Ok(Self {
            name,
            required,
            completed: 0,
        })
    }

    pub fn remaining(&self) -> u32 {
        self.required.saturating_sub(self.completed)
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.required
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.name, self.completed, self.required)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyTaskName);
    }
    Ok(name.to_string())
}

pub(crate) fn validate_required(required: u32) -> Result<(), ValidationError> {
    if required == 0 {
        return Err(ValidationError::not_positive("pomodoros", required));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_name() {
        let task = Task::new("  Taxes ", 2).unwrap();
        assert_eq!(task.name, "Taxes");
        assert_eq!(task.required, 2);
        assert_eq!(task.completed, 0);
    }

    #[test]
    fn new_rejects_blank_name_and_zero_count() {
        assert_eq!(Task::new("   ", 2), Err(ValidationError::EmptyTaskName));
        assert!(matches!(
            Task::new("Taxes", 0),
            Err(ValidationError::NotPositive { .. })
        ));
    }

    #[test]
    fn overshooting_is_allowed() {
        let mut task = Task::new("Accounts", 1).unwrap();
        task.completed = 3;
        assert!(task.is_done());
        assert_eq!(task.remaining(), 0);
        assert_eq!(task.to_string(), "Accounts (3/1)");
    }
}
