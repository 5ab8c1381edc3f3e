//! A running pomodoro session: one timer, one task list, one settings value.
//!
//! The session is owned by whatever drives the event loop. It never reads the
//! clock; the front end calls [`Session::tick`] on a fixed interval and
//! forwards user input through [`Session::dispatch`].

use chrono::Utc;
use std::path::Path;

use crate::command::{Command, Reply};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::storage::{FilePaths, Settings};
use crate::task::{LoadReport, TaskRegistry};
use crate::timer::{Phase, TimerEngine, Transition};

pub const NO_TASK_CAPTION: &str = "No Task Selected";
pub const ALL_DONE_CAPTION: &str = "All Tasks Completed";

#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    tasks: TaskRegistry,
    timer: TimerEngine,
    paths: FilePaths,
}

impl Session {
    /// A paused session at the start of a work phase.
    pub fn new(settings: Settings, tasks: TaskRegistry, paths: FilePaths) -> Self {
        let timer = TimerEngine::new(settings.schedule());
        Self {
            settings,
            tasks,
            timer,
            paths,
        }
    }

    /// Startup: read whichever of the two files exist, defaults otherwise.
    ///
    /// A task file with at least one task selects the first one. Nothing here
    /// fails; unreadable files are logged and skipped.
    pub fn open(paths: FilePaths) -> Self {
        let settings = Settings::load_or_default(&paths.settings);
        let tasks_path = paths.tasks.clone();
        let mut session = Self::new(settings, TaskRegistry::new(), paths);
        match session.load_tasks(&tasks_path) {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %tasks_path.display(), "no task file, starting empty")
            }
            Err(e) => tracing::warn!(error = %e, "could not load tasks"),
        }
        session
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn paths(&self) -> &FilePaths {
        &self.paths
    }

    pub fn phase(&self) -> Phase {
        self.timer.phase()
    }

    /// Text shown beside the clock.
    pub fn caption(&self) -> String {
        let phase = self.timer.phase();
        if phase.is_break() {
            return phase.label().to_string();
        }
        match self.tasks.active() {
            Some(task) => task.name.clone(),
            None if self.tasks.all_done() => ALL_DONE_CAPTION.to_string(),
            None => NO_TASK_CAPTION.to_string(),
        }
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.timer.phase(),
            remaining_secs: self.timer.remaining_secs(),
            total_secs: self.timer.total_secs(),
            running: self.timer.is_running(),
            completed_cycles: self.timer.completed_cycles(),
            caption: self.caption(),
            at: Utc::now(),
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.timer.start()
    }

    /// One second has passed.
    pub fn tick(&mut self) -> Vec<Event> {
        match self.timer.tick() {
            Some(transition) => self.on_transition(transition),
            None => Vec::new(),
        }
    }

    pub fn next(&mut self) -> Vec<Event> {
        let transition = self.timer.advance();
        self.on_transition(transition)
    }

    pub fn toggle_pause(&mut self) -> Event {
        self.timer.toggle_pause()
    }

    pub fn reset(&mut self) -> Event {
        self.timer.reset()
    }

    fn on_transition(&mut self, transition: Transition) -> Vec<Event> {
        let mut events = vec![transition.to_event()];
        if !transition.enters_work() {
            return events;
        }

        let Some(index) = self.tasks.active_index() else {
            return events;
        };
        let Some(task) = self.tasks.credit_active() else {
            return events;
        };
        let done = task.is_done();
        events.push(Event::TaskCredited {
            index,
            name: task.name.clone(),
            completed: task.completed,
            required: task.required,
            at: Utc::now(),
        });

        if done && self.settings.auto_advance_tasks {
            match self.tasks.select_next_unfinished() {
                Some(next) if next != index => {
                    let name = self.tasks.tasks()[next].name.clone();
                    events.push(Event::TaskAdvanced {
                        index: next,
                        name,
                        at: Utc::now(),
                    });
                }
                Some(_) => {}
                None => events.push(Event::AllTasksCompleted { at: Utc::now() }),
            }
        }
        events
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn select_task(&mut self, index: usize) -> Result<(), ValidationError> {
        self.tasks.select(index).map(|_| ())
    }

    pub fn deselect_task(&mut self) {
        self.tasks.deselect();
    }

    pub fn add_task(&mut self, name: &str, required: u32) -> Result<usize, ValidationError> {
        self.tasks.add(name, required)
    }

    pub fn edit_task(&mut self, index: usize, name: &str, required: u32) -> Result<(), ValidationError> {
        self.tasks.edit(index, name, required)
    }

    pub fn remove_task(&mut self, index: usize) -> Result<(), ValidationError> {
        self.tasks.remove(index).map(|_| ())
    }

    /// Replace the task list from `path` and remember it as the save target.
    pub fn load_tasks(&mut self, path: &Path) -> Result<LoadReport> {
        let report = self.tasks.load(path)?;
        self.paths.tasks = path.to_path_buf();
        if !self.tasks.is_empty() {
            self.tasks.select(0)?;
        }
        Ok(report)
    }

    pub fn save_tasks(&self) -> Result<()> {
        if self.settings.persist_progress {
            self.tasks.save_with_progress(&self.paths.tasks)
        } else {
            self.tasks.save(&self.paths.tasks)
        }
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Change one key and restart the cycle with the new durations.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let mut settings = self.settings.clone();
        settings.set(key, value)?;
        self.apply_settings(settings)
    }

    /// Swap in a whole settings value. Invalid settings leave everything as it was.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), ValidationError> {
        settings.validate()?;
        self.timer.set_schedule(settings.schedule());
        self.settings = settings;
        Ok(())
    }

    pub fn save_settings(&self) -> Result<()> {
        self.settings.save(&self.paths.settings)
    }

    /// Write both files. Tries the second even when the first fails.
    pub fn save(&self) -> Result<()> {
        let settings = self.save_settings();
        let tasks = self.save_tasks();
        settings.and(tasks)
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    pub fn dispatch(&mut self, command: Command) -> Result<Reply> {
        let reply = match command {
            Command::Next => Reply::Events(self.next()),
            Command::TogglePause => Reply::Events(vec![self.toggle_pause()]),
            Command::Reset => Reply::Events(vec![self.reset()]),
            Command::Select { index } => {
                self.select_task(index)?;
                Reply::Updated
            }
            Command::Deselect => {
                self.deselect_task();
                Reply::Updated
            }
            Command::AddTask { name, required } => {
                self.add_task(&name, required)?;
                Reply::Updated
            }
            Command::EditTask {
                index,
                name,
                required,
            } => {
                self.edit_task(index, &name, required)?;
                Reply::Updated
            }
            Command::RemoveTask { index } => {
                self.remove_task(index)?;
                Reply::Updated
            }
            Command::Set { key, value } => {
                self.set_setting(&key, &value)?;
                Reply::Updated
            }
            Command::Save => {
                self.save()?;
                Reply::Saved
            }
            Command::Quit => {
                if let Err(e) = self.save() {
                    tracing::error!(error = %e, "saving on quit failed");
                }
                Reply::Quit
            }
        };
        Ok(reply)
    }
}
