use clap::{Parser, Subcommand};
use daytodo_core::config::{ConfigOverrides, canonical_key};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daytodo", author, version, about, long_about = None)]
pub struct Cli {
    /// Without a command, starts an interactive session on stdin
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: daytodo add "Buy milk" --date 2024-01-01 --time 09:00
    Add {
        text: Option<String>,
        /// Day in YYYY-MM-DD (defaults to the selected day)
        #[arg(long)]
        date: Option<String>,
        /// Time in HH:MM (defaults to now)
        #[arg(long)]
        time: Option<String>,
    },
    /// Flip a task between pending and completed
    ///
    /// Example: daytodo toggle task-1704099600000000000
    Toggle { id: String },
    /// Delete a task
    ///
    /// Example: daytodo delete task-1704099600000000000
    Delete { id: String },
    /// Edit a task's text, date or time
    ///
    /// Example: daytodo edit task-1704099600000000000 --text "Buy oat milk"
    /// Example: daytodo edit task-1704099600000000000 --date 2024-01-02 --time 18:30
    Edit {
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },
    /// List the tasks of one day, earliest first
    ///
    /// Example: daytodo list
    /// Example: daytodo list --day 2024-01-01
    List {
        #[arg(long)]
        day: Option<String>,
    },
    /// Move the selected day back by one and list it
    Prev,
    /// Move the selected day forward by one and list it
    Next,
    /// Return to the current day and list it
    Today,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    StoreDir,
    LogFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let key = canonical_key(key_raw);

    let target = match key.as_str() {
        "" => return Err("override key cannot be empty".to_string()),
        "theme" => ConfigOverrideTarget::Theme,
        "store_dir" | "store" => ConfigOverrideTarget::StoreDir,
        "log_filter" | "log" => ConfigOverrideTarget::LogFilter,
        other => return Err(format!("unknown config field '{other}'")),
    };

    if value.is_empty() && target != ConfigOverrideTarget::Theme {
        return Err(format!("{key} override requires a value"));
    }

    Ok(ParsedConfigOverride { target, value })
}

pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::StoreDir => {
                overrides.store_dir = Some(PathBuf::from(parsed.value))
            }
            ConfigOverrideTarget::LogFilter => overrides.log_filter = Some(parsed.value),
        }
    }
    Ok(overrides)
}
