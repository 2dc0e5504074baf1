use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use log::error;

pub const DEFAULT_ACHIEVEMENT_LOG: &str = "achievements.log";

/// Append-only sink for achievement records, one free-text line each.
pub trait AchievementLog {
    fn save(&mut self, line: &str);

    fn read(&self) -> Vec<String>;
}

/// Keeps records in memory; used for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryAchievementLog {
    lines: Vec<String>,
}

impl MemoryAchievementLog {
    pub fn new() -> Self {
        MemoryAchievementLog::default()
    }
}

impl AchievementLog for MemoryAchievementLog {
    fn save(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn read(&self) -> Vec<String> {
        self.lines.clone()
    }
}

/// Appends records to a text file. I/O failures are logged and dropped.
#[derive(Clone, Debug)]
pub struct FileAchievementLog {
    path: PathBuf,
}

impl FileAchievementLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileAchievementLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", line)
    }

    fn read_lines(&self) -> io::Result<Vec<String>> {
        let file = File::open(&self.path)?;
        BufReader::new(file).lines().collect()
    }
}

impl Default for FileAchievementLog {
    fn default() -> Self {
        FileAchievementLog::new(DEFAULT_ACHIEVEMENT_LOG)
    }
}

impl AchievementLog for FileAchievementLog {
    fn save(&mut self, line: &str) {
        if let Err(e) = self.append(line) {
            error!("Error writing to achievement log {}: {}", self.path.display(), e);
        }
    }

    fn read(&self) -> Vec<String> {
        if !self.path.exists() {
            return Vec::new();
        }
        self.read_lines().unwrap_or_else(|e| {
            error!("Error reading achievement log {}: {}", self.path.display(), e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_log_keeps_lines_in_order() {
        let mut log = MemoryAchievementLog::new();
        log.save("Mastered: Survivor");
        log.save("Mastered: Sharp Shooter");
        assert_eq!(log.read(), vec!["Mastered: Survivor", "Mastered: Sharp Shooter"]);
    }

    #[test]
    fn file_log_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("achievements.log");

        let mut first = FileAchievementLog::new(&path);
        first.save("Mastered: Survivor");
        let mut second = FileAchievementLog::new(&path);
        second.save("Mastered: Enemy Exterminator");

        assert_eq!(
            second.read(),
            vec!["Mastered: Survivor", "Mastered: Enemy Exterminator"]
        );
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileAchievementLog::new(dir.path().join("nope.log"));
        assert!(log.read().is_empty());
    }

    #[test]
    fn unwritable_path_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let mut log = FileAchievementLog::new(dir.path());
        log.save("Mastered: Survivor");
        assert_eq!(log.path(), dir.path());
    }

    #[test]
    fn set_path_redirects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = FileAchievementLog::default();
        assert_eq!(log.path(), Path::new(DEFAULT_ACHIEVEMENT_LOG));
        log.set_path(dir.path().join("other.log"));
        log.save("Mastered: Survivor");
        assert_eq!(log.read(), vec!["Mastered: Survivor"]);
    }
}
