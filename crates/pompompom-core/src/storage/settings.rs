//! Timer settings and their on-disk form.
//!
//! The settings file is a flat key/value mapping:
//!
//! ```json
//! {
//!     "work": 25,
//!     "short": 5,
//!     "long": 15,
//!     "cycles": 4
//! }
//! ```
//!
//! Durations are whole minutes. Numbers may also be written as strings
//! (`"work": "25"`), which is how older files store them. A `.toml` file
//! with the same keys works too.

use serde::Serialize;
use serde_json::Value;
use std::io;
use std::path::Path;

use crate::error::{CoreError, FileFormatError, Result, ValidationError};
use crate::timer::Schedule;

/// Every key the settings file understands, in the order they are listed.
pub const SETTINGS_KEYS: [&str; 6] = [
    "work",
    "short",
    "long",
    "cycles",
    "auto_advance_tasks",
    "persist_progress",
];

/// Serialization format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SettingsFormat::Toml,
            _ => SettingsFormat::Json,
        }
    }
}

/// Durations and cycle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Work phase, minutes.
    #[serde(rename = "work")]
    pub work_minutes: u32,
    /// Short break, minutes.
    #[serde(rename = "short")]
    pub short_break_minutes: u32,
    /// Long break, minutes.
    #[serde(rename = "long")]
    pub long_break_minutes: u32,
    /// Work phases before a long break.
    #[serde(rename = "cycles")]
    pub cycles_before_long_break: u32,
    /// Move on to the next unfinished task once the active one hits its target.
    pub auto_advance_tasks: bool,
    /// Store completed counts in the task file on save.
    pub persist_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            cycles_before_long_break: 4,
            auto_advance_tasks: true,
            persist_progress: false,
        }
    }
}

impl Settings {
    /// Load a settings file over the defaults.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] when the file is absent, [`FileFormatError::Syntax`]
    /// when it cannot be parsed. Individual bad values are logged and skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = Self::default();
        for warning in settings.overlay_file(path)? {
            tracing::warn!(path = %path.display(), %warning, "ignoring settings value");
        }
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load from disk, returning defaults on any error.
    /// This is a convenience method that never fails.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) if e.is_not_found() => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default settings");
                Self::default()
            }
        }
    }

    /// Read `path` and overlay every recognized key onto `self`.
    ///
    /// Returns one warning per recognized key whose value was unusable.
    /// On a syntax error `self` is left untouched.
    pub fn overlay_file(&mut self, path: &Path) -> Result<Vec<FileFormatError>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CoreError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let root = parse_document(&text, SettingsFormat::for_path(path)).map_err(|message| {
            FileFormatError::Syntax {
                path: path.to_path_buf(),
                message,
            }
        })?;
        Ok(self.overlay(&root))
    }

    /// Overlay recognized keys from an already parsed document.
    pub fn overlay(&mut self, root: &Value) -> Vec<FileFormatError> {
        let Some(map) = root.as_object() else {
            return vec![FileFormatError::InvalidSetting {
                key: String::new(),
                message: "settings must be a key/value mapping".into(),
            }];
        };
        SETTINGS_KEYS
            .iter()
            .filter_map(|key| map.get(*key).map(|value| (*key, value)))
            .filter_map(|(key, value)| {
                self.apply(key, value)
                    .err()
                    .map(|e| FileFormatError::InvalidSetting {
                        key: key.to_string(),
                        message: e.to_string(),
                    })
            })
            .collect()
    }

    /// Persist every key.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match SettingsFormat::for_path(path) {
            SettingsFormat::Json => serde_json::to_string_pretty(self)? + "\n",
            SettingsFormat::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Get a value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "work" => self.work_minutes.to_string(),
            "short" => self.short_break_minutes.to_string(),
            "long" => self.long_break_minutes.to_string(),
            "cycles" => self.cycles_before_long_break.to_string(),
            "auto_advance_tasks" => self.auto_advance_tasks.to_string(),
            "persist_progress" => self.persist_progress.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a value by key. On error nothing changes.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        self.apply(key, &Value::String(value.trim().to_string()))
    }

    /// Reject anything the timer cannot run with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("work", self.work_minutes),
            ("short", self.short_break_minutes),
            ("long", self.long_break_minutes),
            ("cycles", self.cycles_before_long_break),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((key, value)) => Err(ValidationError::not_positive(key, value)),
            None => Ok(()),
        }
    }

    pub fn schedule(&self) -> Schedule {
        Schedule::from_minutes(
            self.work_minutes.into(),
            self.short_break_minutes.into(),
            self.long_break_minutes.into(),
            self.cycles_before_long_break.into(),
        )
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<(), ValidationError> {
        match key {
            "work" => self.work_minutes = positive(key, value)?,
            "short" => self.short_break_minutes = positive(key, value)?,
            "long" => self.long_break_minutes = positive(key, value)?,
            "cycles" => self.cycles_before_long_break = positive(key, value)?,
            "auto_advance_tasks" => self.auto_advance_tasks = boolean(key, value)?,
            "persist_progress" => self.persist_progress = boolean(key, value)?,
            _ => return Err(ValidationError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_document(text: &str, format: SettingsFormat) -> std::result::Result<Value, String> {
    match format {
        SettingsFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        SettingsFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
    }
}

fn positive(key: &str, value: &Value) -> Result<u32, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::not_positive(key, display(value))),
    }
}

fn boolean(key: &str, value: &Value) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => s.trim().parse::<bool>().map_err(|_| ValidationError::InvalidValue {
            field: key.to_string(),
            message: format!("expected true or false, got '{s}'"),
        }),
        other => Err(ValidationError::InvalidValue {
            field: key.to_string(),
            message: format!("expected true or false, got {other}"),
        }),
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
