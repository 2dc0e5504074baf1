use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::achievement_log::DEFAULT_ACHIEVEMENT_LOG;

/// Dodge and shoot your way down a 10x20 asteroid field.
#[derive(Parser, Debug, Clone)]
#[command(name = "asteroid-grid", version, about)]
pub struct Config {
    /// Seed for the spawn generator; omit for a random run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log moves, hits, level-ups and achievement progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 250)]
    pub tick_ms: u64,

    /// File mastered achievements are appended to
    #[arg(long, default_value = DEFAULT_ACHIEVEMENT_LOG)]
    pub achievements: PathBuf,

    /// Diagnostic log file
    #[arg(long, default_value = "asteroid-grid.log")]
    pub log_file: PathBuf,

    /// Run headless with scripted input, dumping frames to the log
    #[arg(long)]
    pub debug: bool,

    /// Stop after this many ticks
    #[arg(long)]
    pub max_ticks: Option<u64>,
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose { LevelFilter::Debug } else { LevelFilter::Info }
    }

    pub fn tick_limit_reached(&self, tick: u64) -> bool {
        self.max_ticks.is_some_and(|max| tick >= max)
    }
}
