mod settings;

pub use settings::{Settings, SettingsFormat, SETTINGS_KEYS};

use std::path::{Path, PathBuf};

/// Task file picked up from the working directory at startup.
pub const DEFAULT_TASKS_FILE: &str = "tasks.csv";
/// Settings file picked up from the working directory at startup.
pub const DEFAULT_SETTINGS_FILE: &str = "config.json";

/// Where a session reads and writes its two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePaths {
    pub tasks: PathBuf,
    pub settings: PathBuf,
}

impl FilePaths {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            tasks: dir.join(DEFAULT_TASKS_FILE),
            settings: dir.join(DEFAULT_SETTINGS_FILE),
        }
    }
}

impl Default for FilePaths {
    fn default() -> Self {
        Self {
            tasks: PathBuf::from(DEFAULT_TASKS_FILE),
            settings: PathBuf::from(DEFAULT_SETTINGS_FILE),
        }
    }
}
