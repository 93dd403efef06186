//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// What to do when persisting a completed item fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PersistFailurePolicy {
    /// Log the failure and reset to idle anyway.
    #[default]
    Ignore,
    /// Keep the item incomplete and park the session paused one second
    /// from done, so the final tick retries the persist.
    Rollback,
}

/// Core timer configuration, independent of the CLI surface.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    /// Session length in minutes; fractions are allowed (0.25 = 15s).
    pub minutes: f64,
    pub persist_failure: PersistFailurePolicy,
}

impl TimerConfig {
    pub fn new(minutes: f64) -> Self {
        Self {
            minutes,
            persist_failure: PersistFailurePolicy::default(),
        }
    }

    pub fn with_persist_failure(mut self, policy: PersistFailurePolicy) -> Self {
        self.persist_failure = policy;
        self
    }

    /// Countdown length in seconds. The extra second pads the first tick
    /// so the displayed time starts at the full configured duration.
    pub fn total_seconds(&self) -> u64 {
        (self.minutes * 60.0) as u64 + 1
    }
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "focus-timer")]
#[command(about = "A pomodoro-style focus timer for to-do items")]
#[command(version)]
pub struct Config {
    /// Identifier of the item to focus on
    #[arg(short, long)]
    pub item: String,

    /// Display title used when the item does not exist in the store yet
    #[arg(long)]
    pub title: Option<String>,

    /// Session length in minutes (fractions allowed, e.g. 0.25)
    #[arg(short, long, default_value = "25")]
    pub minutes: f64,

    /// JSON file holding the to-do items; in-memory only when omitted
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// What to do when persisting the completed item fails
    #[arg(long, value_enum, default_value = "ignore")]
    pub on_persist_failure: PersistFailurePolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Core timer configuration derived from the CLI arguments
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::new(self.minutes).with_persist_failure(self.on_persist_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_seconds_pads_by_one() {
        assert_eq!(TimerConfig::new(0.25).total_seconds(), 16);
        assert_eq!(TimerConfig::new(1.0).total_seconds(), 61);
        assert_eq!(TimerConfig::new(25.0).total_seconds(), 1501);
    }

    #[test]
    fn default_policy_is_ignore() {
        assert_eq!(
            TimerConfig::new(25.0).persist_failure,
            PersistFailurePolicy::Ignore
        );
    }
}
