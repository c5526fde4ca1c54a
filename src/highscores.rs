//! High score persistence
//!
//! A single integer stored as a decimal string in a plain-text file at a
//! fixed relative path. A missing or unparseable file reads as zero, and the
//! file is only rewritten when a run strictly beats the stored score.

use std::fs;
use std::path::PathBuf;

/// Default high-score file, relative to the working directory.
pub const HIGH_SCORE_FILE: &str = "high_score.txt";

/// The persisted best score, kept in memory alongside its backing file.
#[derive(Debug, Clone)]
pub struct HighScore {
    best: u32,
    path: PathBuf,
}

impl HighScore {
    /// Load from the default path.
    pub fn load() -> Self {
        Self::load_from(HIGH_SCORE_FILE)
    }

    /// Load from an explicit path. Read failures of any kind mean "no high
    /// score yet" and are never an error.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = fs::read_to_string(&path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);
        if best > 0 {
            log::info!("high score {} loaded from {}", best, path.display());
        }
        Self { best, path }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a finished run's score. Rewrites the file only on a strict
    /// improvement; returns true when a new record was set. A write failure
    /// keeps the new record in memory and logs the miss.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match fs::write(&self.path, score.to_string()) {
            Ok(()) => log::info!("new high score: {}", score),
            Err(err) => log::warn!(
                "could not save high score to {}: {}",
                self.path.display(),
                err
            ),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("burrow_dash_{}_{}.txt", tag, std::process::id()))
    }

    #[test]
    fn round_trips_a_saved_score() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut scores = HighScore::load_from(&path);
        assert_eq!(scores.best(), 0);
        assert!(scores.record(17));

        let reloaded = HighScore::load_from(&path);
        assert_eq!(reloaded.best(), 17);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn a_lower_score_never_overwrites() {
        let path = temp_path("lower");
        let _ = fs::remove_file(&path);

        let mut scores = HighScore::load_from(&path);
        assert!(scores.record(17));
        assert!(!scores.record(5));
        assert!(!scores.record(17));

        assert_eq!(fs::read_to_string(&path).unwrap(), "17");
        assert_eq!(HighScore::load_from(&path).best(), 17);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let scores = HighScore::load_from(temp_path("missing-never-created"));
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn corrupt_file_reads_as_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(HighScore::load_from(&path).best(), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let path = temp_path("whitespace");
        fs::write(&path, " 42\n").unwrap();
        assert_eq!(HighScore::load_from(&path).best(), 42);
        let _ = fs::remove_file(&path);
    }
}
