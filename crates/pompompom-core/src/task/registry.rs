//! In-memory task list backed by a flat CSV file.
//!
//! File layout:
//!
//! ```text
//! Task Name,Pomodoros
//! Taxes,2
//! Accounts,2
//! ```
//!
//! An optional third `Completed` column carries progress. It is only written
//! by [`TaskRegistry::save_with_progress`]; plain [`TaskRegistry::save`] keeps
//! the two-column layout.

use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use super::{validate_name, validate_required, Task};
use crate::error::{CoreError, FileFormatError, Result, ValidationError};

pub const TASKS_HEADER: [&str; 2] = ["Task Name", "Pomodoros"];
pub const TASKS_HEADER_WITH_PROGRESS: [&str; 3] = ["Task Name", "Pomodoros", "Completed"];

/// Outcome of a load: how many rows made it in and which were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<FileFormatError>,
}

/// Ordered task list with at most one active task.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    active: Option<usize>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Task> {
        self.active.and_then(|i| self.tasks.get(i))
    }

    pub fn all_done(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(Task::is_done)
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Append a task. Returns its index.
    pub fn add(&mut self, name: &str, required: u32) -> Result<usize, ValidationError> {
        let task = Task::new(name, required)?;
        self.tasks.push(task);
        Ok(self.tasks.len() - 1)
    }

    /// Rename and re-estimate a task. Progress is kept.
    pub fn edit(&mut self, index: usize, name: &str, required: u32) -> Result<(), ValidationError> {
        self.check_index(index)?;
        let name = validate_name(name)?;
        validate_required(required)?;
        let task = &mut self.tasks[index];
        task.name = name;
        task.required = required;
        Ok(())
    }

    /// Remove a task, keeping the active selection pointed at the same task.
    pub fn remove(&mut self, index: usize) -> Result<Task, ValidationError> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        self.active = match self.active {
            Some(a) if a == index => None,
            Some(a) if a > index => Some(a - 1),
            other => other,
        };
        Ok(removed)
    }

    /// Replace every task at once, clearing the selection.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.active = None;
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn select(&mut self, index: usize) -> Result<&Task, ValidationError> {
        self.check_index(index)?;
        self.active = Some(index);
        Ok(&self.tasks[index])
    }

    pub fn deselect(&mut self) {
        self.active = None;
    }

    /// Add one completed pomodoro to the active task, if any.
    pub fn credit_active(&mut self) -> Option<&Task> {
        let index = self.active?;
        let task = self.tasks.get_mut(index)?;
        task.completed = task.completed.saturating_add(1);
        Some(&*task)
    }

    /// Move the selection to the next unfinished task after the active one,
    /// wrapping around. Clears the selection when every task is done.
    pub fn select_next_unfinished(&mut self) -> Option<usize> {
        let len = self.tasks.len();
        let start = self.active.map(|a| a + 1).unwrap_or(0);
        self.active = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| !self.tasks[i].is_done());
        self.active
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Replace the list with the contents of a CSV file.
    ///
    /// Bad rows are skipped and listed in the report. A missing file is
    /// [`CoreError::NotFound`] and leaves the registry untouched.
    pub fn load(&mut self, path: &Path) -> Result<LoadReport> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CoreError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let report = self.load_from(file)?;
        tracing::info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded tasks"
        );
        Ok(report)
    }

    pub fn load_from<R: Read>(&mut self, reader: R) -> Result<LoadReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut tasks = Vec::new();
        let mut report = LoadReport::default();

        for result in rdr.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    report.skipped.push(malformed(line, e.to_string()));
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            match parse_row(&record) {
                Ok(task) => tasks.push(task),
                Err(reason) => {
                    tracing::warn!(line, %reason, "skipping task row");
                    report.skipped.push(malformed(line, reason));
                }
            }
        }

        report.loaded = tasks.len();
        self.replace(tasks);
        Ok(report)
    }

    /// Write the two-column file. Completed counts are not stored.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.save_to(File::create(path)?, false)?;
        tracing::info!(path = %path.display(), tasks = self.tasks.len(), "saved tasks");
        Ok(())
    }

    /// Write the three-column file including completed counts.
    pub fn save_with_progress(&self, path: &Path) -> Result<()> {
        self.save_to(File::create(path)?, true)?;
        tracing::info!(path = %path.display(), tasks = self.tasks.len(), "saved tasks with progress");
        Ok(())
    }

    pub fn save_to<W: Write>(&self, writer: W, with_progress: bool) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        if with_progress {
            wtr.write_record(TASKS_HEADER_WITH_PROGRESS)?;
        } else {
            wtr.write_record(TASKS_HEADER)?;
        }
        for task in &self.tasks {
            let required = task.required.to_string();
            if with_progress {
                let completed = task.completed.to_string();
                wtr.write_record([task.name.as_str(), required.as_str(), completed.as_str()])?;
            } else {
                wtr.write_record([task.name.as_str(), required.as_str()])?;
            }
        }
        wtr.flush()?;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.tasks.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "tasks".into(),
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }
}

fn malformed(line: u64, reason: String) -> FileFormatError {
    FileFormatError::MalformedRow { line, reason }
}

fn parse_row(record: &csv::StringRecord) -> std::result::Result<Task, String> {
    if record.len() != 2 && record.len() != 3 {
        return Err(format!("expected 2 or 3 columns, found {}", record.len()));
    }
    let name = record.get(0).unwrap_or("");
    let required = record.get(1).unwrap_or("");
    let required: u32 = required
        .parse()
        .map_err(|_| format!("pomodoro count '{required}' is not a whole number"))?;
    let mut task = Task::new(name, required).map_err(|e| e.to_string())?;

    if let Some(completed) = record.get(2).filter(|c| !c.is_empty()) {
        task.completed = completed
            .parse()
            .map_err(|_| format!("completed count '{completed}' is not a whole number"))?;
    }
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry(rows: &[(&str, u32)]) -> TaskRegistry {
        let mut reg = TaskRegistry::new();
        for (name, required) in rows {
            reg.add(name, *required).unwrap();
        }
        reg
    }

    #[test]
    fn load_two_tasks() {
        let mut reg = TaskRegistry::new();
        let csv = "Task Name,Pomodoros\nTaxes,2\nAccounts,2\n";
        let report = reg.load_from(csv.as_bytes()).unwrap();

        assert_eq!(report.loaded, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.tasks()[0], Task { name: "Taxes".into(), required: 2, completed: 0 });
        assert_eq!(reg.tasks()[1], Task { name: "Accounts".into(), required: 2, completed: 0 });
    }

    #[test]
    fn load_skips_malformed_rows() {
        let mut reg = TaskRegistry::new();
        let csv = "Task Name,Pomodoros\n\
                   Taxes,2\n\
                   ,3\n\
                   Laundry,two\n\
                   Dishes,0\n\
                   Lonely\n\
                   Accounts,4\n";
        let report = reg.load_from(csv.as_bytes()).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 4);
        let names: Vec<_> = reg.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Taxes", "Accounts"]);
        assert!(matches!(
            report.skipped[1],
            FileFormatError::MalformedRow { line: 4, .. }
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        let mut reg = registry(&[("Old", 1)]);
        reg.load_from("Task Name,Pomodoros\n".as_bytes()).unwrap();
        assert!(reg.is_empty());
    }

    #[test]
    fn load_reads_optional_progress_column() {
        let mut reg = TaskRegistry::new();
        let csv = "Task Name,Pomodoros,Completed\nTaxes,2,1\nAccounts,3,\n";
        reg.load_from(csv.as_bytes()).unwrap();
        assert_eq!(reg.tasks()[0].completed, 1);
        assert_eq!(reg.tasks()[1].completed, 0);
    }

    #[test]
    fn load_clears_selection() {
        let mut reg = registry(&[("A", 1)]);
        reg.select(0).unwrap();
        reg.load_from("Task Name,Pomodoros\nB,1\n".as_bytes()).unwrap();
        assert_eq!(reg.active_index(), None);
    }

    #[test]
    fn missing_file_is_not_found_and_keeps_list() {
        let dir = TempDir::new().unwrap();
        let mut reg = registry(&[("Keep", 1)]);
        let err = reg.load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn save_then_load_roundtrips_names_and_counts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        let mut reg = registry(&[("Taxes", 2), ("Write report, draft 2", 5)]);
        reg.select(0).unwrap();
        reg.credit_active();
        reg.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Task Name,Pomodoros\n"));

        let mut loaded = TaskRegistry::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.tasks()[0].name, "Taxes");
        assert_eq!(loaded.tasks()[0].required, 2);
        assert_eq!(loaded.tasks()[0].completed, 0);
        assert_eq!(loaded.tasks()[1].name, "Write report, draft 2");
        assert_eq!(loaded.tasks()[1].required, 5);
    }

    #[test]
    fn save_with_progress_keeps_completed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        let mut reg = registry(&[("Taxes", 2)]);
        reg.select(0).unwrap();
        reg.credit_active();
        reg.save_with_progress(&path).unwrap();

        let mut loaded = TaskRegistry::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.tasks()[0].completed, 1);
    }

    #[test]
    fn edit_validates_and_keeps_progress() {
        let mut reg = registry(&[("Taxes", 2)]);
        reg.select(0).unwrap();
        reg.credit_active();

        assert_eq!(reg.edit(0, " ", 3), Err(ValidationError::EmptyTaskName));
        assert!(reg.edit(5, "X", 3).is_err());
        assert_eq!(reg.tasks()[0].name, "Taxes");

        reg.edit(0, "Tax return", 3).unwrap();
        assert_eq!(reg.tasks()[0].name, "Tax return");
        assert_eq!(reg.tasks()[0].required, 3);
        assert_eq!(reg.tasks()[0].completed, 1);
    }

    #[test]
    fn remove_shifts_or_clears_selection() {
        let mut reg = registry(&[("A", 1), ("B", 1), ("C", 1)]);
        reg.select(2).unwrap();
        reg.remove(0).unwrap();
        assert_eq!(reg.active().map(|t| t.name.as_str()), Some("C"));

        reg.remove(1).unwrap();
        assert_eq!(reg.active_index(), None);
        assert!(reg.remove(7).is_err());
    }

    #[test]
    fn only_one_active_task() {
        let mut reg = registry(&[("A", 1), ("B", 1)]);
        reg.select(0).unwrap();
        reg.select(1).unwrap();
        assert_eq!(reg.active_index(), Some(1));
        assert!(reg.select(2).is_err());
        assert_eq!(reg.active_index(), Some(1));
    }

    #[test]
    fn credit_without_selection_is_noop() {
        let mut reg = registry(&[("A", 1), ("B", 2)]);
        assert!(reg.credit_active().is_none());
        assert!(reg.tasks().iter().all(|t| t.completed == 0));
    }

    #[test]
    fn next_unfinished_wraps_and_clears_when_all_done() {
        let mut reg = registry(&[("A", 1), ("B", 1), ("C", 1)]);
        reg.select(1).unwrap();
        reg.credit_active();
        assert_eq!(reg.select_next_unfinished(), Some(2));
        reg.credit_active();
        assert_eq!(reg.select_next_unfinished(), Some(0));
        reg.credit_active();
        assert_eq!(reg.select_next_unfinished(), None);
        assert!(reg.all_done());
    }
}
