//! User commands a front end can send into a [`Session`](crate::Session).

use serde::{Deserialize, Serialize};

use crate::events::Event;

/// One user action. Task indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Jump to the next phase now.
    Next,
    /// Pause a running timer or resume a paused one.
    TogglePause,
    /// Mark a task as the one credited with pomodoros.
    Select { index: usize },
    /// Stop crediting any task.
    Deselect,
    AddTask { name: String, required: u32 },
    EditTask { index: usize, name: String, required: u32 },
    RemoveTask { index: usize },
    /// Change one settings key. The timer restarts at work with the new durations.
    Set { key: String, value: String },
    /// Restart the cycle at work.
    Reset,
    /// Write the task and settings files.
    Save,
    /// Save and stop.
    Quit,
}

/// What the front end should do after a command.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The timer or task credit changed; render these.
    Events(Vec<Event>),
    /// Task list, selection or settings changed; redraw.
    Updated,
    /// Files were written.
    Saved,
    /// Files were written and the session is over.
    Quit,
}
