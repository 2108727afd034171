//! Review settings, read from a TOML file.
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "review.toml";

/// Where the interval returned after grading is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowIntervals {
    #[default]
    Never,
    StatusBar,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// SQLite file holding the cards.
    pub store_path: PathBuf,
    /// The current card can only be edited once its answer is shown.
    pub only_editable_when_answer_shown: bool,
    pub show_intervals: ShowIntervals,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("db.sqlite3"),
            only_editable_when_answer_shown: false,
            show_intervals: ShowIntervals::Never,
        }
    }
}

impl ReviewConfig {
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads the configuration file, falling back to defaults when it does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults.", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        log::debug!("Loaded configuration from {}.", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = ReviewConfig::parse("").unwrap();
        assert_eq!(config, ReviewConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let config = ReviewConfig::parse(
            r#"
            store_path = "polish.sqlite3"
            only_editable_when_answer_shown = true
            show_intervals = "statusbar"
            "#,
        )
        .unwrap();
        assert_eq!(config.store_path, PathBuf::from("polish.sqlite3"));
        assert!(config.only_editable_when_answer_shown);
        assert_eq!(config.show_intervals, ShowIntervals::StatusBar);
    }

    #[test]
    fn test_unknown_show_intervals_rejected() {
        let result = ReviewConfig::parse(r#"show_intervals = "tooltips""#);
        assert!(matches!(result, Err(ReviewError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "only_editable_when_answer_shown = true").unwrap();
        let config = ReviewConfig::load(file.path()).unwrap();
        assert!(config.only_editable_when_answer_shown);
        assert_eq!(config.store_path, PathBuf::from("db.sqlite3"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReviewConfig::load(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, ReviewConfig::default());
    }
}
