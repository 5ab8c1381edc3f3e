//! # pompompom Core Library
//!
//! Core logic for a single-window Pomodoro timer. Every operation is
//! available to any front end; the terminal binary in `pompompom-cli` is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine; the caller invokes
//!   `tick()` once per second
//! - **Task Registry**: ordered task list stored as CSV, one active task
//! - **Settings**: durations and cycle length stored as JSON (or TOML)
//! - **Session**: owns all three and maps [`Command`]s to handlers
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TaskRegistry`]: Task list and selection
//! - [`Settings`]: Configuration with per-key defaults
//! - [`Session`]: The context object a front end drives

pub mod command;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod task;
pub mod timer;

pub use command::{Command, Reply};
pub use error::{CoreError, FileFormatError, Result, ValidationError};
pub use events::Event;
pub use session::Session;
pub use storage::{FilePaths, Settings, DEFAULT_SETTINGS_FILE, DEFAULT_TASKS_FILE};
pub use task::{LoadReport, Task, TaskRegistry};
pub use timer::{Phase, Schedule, TimerEngine, Transition};
