use std::path::Path;

use clap::Subcommand;
use pompompom_core::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "work", "cycles")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(path: &Path, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Settings::load_or_default(path);
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Settings::load_or_default(path);
            config.set(&key, &value)?;
            config.save(path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Settings::load_or_default(path);
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Settings::default();
            config.save(path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
