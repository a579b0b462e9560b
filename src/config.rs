use std::{path::PathBuf, str::FromStr};

use log::LevelFilter;

use crate::cli::Cli;

/// Runtime settings resolved from flags, the environment and `.env`.
#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub organizer_email: String,
    pub log: LogSettings,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogSettings {
    pub stderr_level: LevelFilter,
    /// File logging stays off unless `LOG_FILE_PATH` is set.
    pub file: Option<LogFileSettings>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogFileSettings {
    pub path: PathBuf,
    pub archive_pattern: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let file_path = std::env::var("LOG_FILE_PATH").ok();
        let archive_pattern = std::env::var("LOG_ARCHIVE_PATTERN").ok();
        Self {
            data_dir: cli.data_dir.clone(),
            organizer_email: cli.organizer_email.clone(),
            log: LogSettings::resolve(&cli.log_level, file_path, archive_pattern),
        }
    }
}

impl LogSettings {
    pub fn resolve(
        level: &str,
        file_path: Option<String>,
        archive_pattern: Option<String>,
    ) -> Self {
        let stderr_level = LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info);
        let file = file_path
            .filter(|path| !path.trim().is_empty())
            .map(|path| LogFileSettings {
                archive_pattern: archive_pattern
                    .filter(|pattern| !pattern.trim().is_empty())
                    .unwrap_or_else(|| format!("{}.{{}}.gz", path)),
                path: PathBuf::from(path),
            });
        Self { stderr_level, file }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let settings = LogSettings::resolve("loud", None, None);
        assert_eq!(settings.stderr_level, LevelFilter::Info);
        assert_eq!(settings.file, None);
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let settings = LogSettings::resolve("WARN", None, None);
        assert_eq!(settings.stderr_level, LevelFilter::Warn);
    }

    #[test]
    fn test_archive_pattern_defaults_next_to_log_file() {
        let settings = LogSettings::resolve("info", Some("logs/copa.log".to_string()), None);
        assert_eq!(
            settings.file,
            Some(LogFileSettings {
                path: PathBuf::from("logs/copa.log"),
                archive_pattern: "logs/copa.log.{}.gz".to_string(),
            })
        );
    }

    #[test]
    fn test_blank_file_path_disables_file_logging() {
        let settings = LogSettings::resolve("debug", Some("  ".to_string()), Some("x.{}".to_string()));
        assert_eq!(settings.file, None);
    }
}
