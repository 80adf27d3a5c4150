//! Store location and retention configuration.
//!
//! # Responsibility
//! - Resolve each tool's data file path from defaults, environment and
//!   explicit overrides.
//! - Carry the resolved settings into `JsonStore` construction.
//!
//! # Invariants
//! - Explicit overrides win over environment, environment over defaults.
//! - Resolution has no side effects; directories are created on save.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding the pebbles data file.
pub const PEBBLES_FILE_ENV: &str = "GRATITUDE_PEBBLES_FILE";
/// Backup generations kept by stores that rotate backups.
pub const DEFAULT_MAX_BACKUPS: usize = 3;
/// Upper bound on backup generations accepted from an override.
pub const MAX_BACKUPS_LIMIT: usize = 10;

const COMMITS_DIR: &str = ".commit_your_day";
const COMMITS_FILE: &str = "life_commits.json";
const PEBBLES_FILE: &str = ".gratitude_pebbles.json";
const CAPSULE_FILE: &str = "capsule_data.json";
const JAR_FILE: &str = "memories.json";

/// Resolved settings for one `JsonStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Primary data file.
    pub path: PathBuf,
    /// Number of `.bakN` generations kept on save; zero disables rotation.
    pub max_backups: usize,
}

impl StoreConfig {
    /// Config for `path` without backup rotation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_backups: 0,
        }
    }

    pub fn with_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }
}

/// Explicit caller overrides, typically from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub file: Option<PathBuf>,
    pub max_backups: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A home-relative default was needed but no home directory is known.
    NoHomeDir,
    /// An explicit file override was blank.
    EmptyOverride,
    /// The backup override exceeds `MAX_BACKUPS_LIMIT`.
    TooManyBackups(usize),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDir => write!(f, "could not determine the home directory"),
            Self::EmptyOverride => write!(f, "data file override cannot be empty"),
            Self::TooManyBackups(count) => write!(
                f,
                "backup generations must be at most {MAX_BACKUPS_LIMIT}, got {count}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// The journaling tools, each owning one data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Commits,
    Pebbles,
    Capsule,
    Jar,
}

impl ToolKind {
    /// Backup generations kept when no override is given.
    pub fn default_backups(self) -> usize {
        match self {
            Self::Commits => DEFAULT_MAX_BACKUPS,
            Self::Pebbles | Self::Capsule | Self::Jar => 0,
        }
    }

    /// Resolves the config using the process environment and home directory.
    pub fn resolve(self, overrides: &ConfigOverrides) -> Result<StoreConfig, ConfigError> {
        let env_override = match self {
            Self::Pebbles => std::env::var(PEBBLES_FILE_ENV).ok(),
            _ => None,
        };
        self.resolve_with(overrides, dirs::home_dir().as_deref(), env_override.as_deref())
    }

    /// Pure resolution given an explicit home directory and env value.
    pub fn resolve_with(
        self,
        overrides: &ConfigOverrides,
        home: Option<&Path>,
        env_override: Option<&str>,
    ) -> Result<StoreConfig, ConfigError> {
        let path = match &overrides.file {
            Some(file) if file.as_os_str().is_empty() => return Err(ConfigError::EmptyOverride),
            Some(file) => expand_home(&file.to_string_lossy(), home)?,
            None => self.default_path(home, env_override)?,
        };
        let max_backups = match overrides.max_backups {
            Some(count) if count > MAX_BACKUPS_LIMIT => {
                return Err(ConfigError::TooManyBackups(count))
            }
            Some(count) => count,
            None => self.default_backups(),
        };
        Ok(StoreConfig { path, max_backups })
    }

    fn default_path(self, home: Option<&Path>, env_override: Option<&str>) -> Result<PathBuf, ConfigError> {
        match self {
            Self::Commits => Ok(home
                .ok_or(ConfigError::NoHomeDir)?
                .join(COMMITS_DIR)
                .join(COMMITS_FILE)),
            Self::Pebbles => match env_override.map(str::trim).filter(|v| !v.is_empty()) {
                Some(value) => expand_home(value, home),
                None => Ok(home.ok_or(ConfigError::NoHomeDir)?.join(PEBBLES_FILE)),
            },
            Self::Capsule => Ok(PathBuf::from(CAPSULE_FILE)),
            Self::Jar => Ok(PathBuf::from(JAR_FILE)),
        }
    }
}

fn expand_home(raw: &str, home: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if raw == "~" {
        return home.map(Path::to_path_buf).ok_or(ConfigError::NoHomeDir);
    }
    match raw.strip_prefix("~/") {
        Some(rest) => Ok(home.ok_or(ConfigError::NoHomeDir)?.join(rest)),
        None => Ok(PathBuf::from(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ConfigOverrides, ToolKind, DEFAULT_MAX_BACKUPS, MAX_BACKUPS_LIMIT};
    use std::path::{Path, PathBuf};

    const HOME: &str = "/home/tester";

    #[test]
    fn commits_default_under_home_with_backups() {
        let config = ToolKind::Commits
            .resolve_with(&ConfigOverrides::default(), Some(Path::new(HOME)), None)
            .unwrap();
        assert_eq!(
            config.path,
            PathBuf::from("/home/tester/.commit_your_day/life_commits.json")
        );
        assert_eq!(config.max_backups, DEFAULT_MAX_BACKUPS);
    }

    #[test]
    fn pebbles_env_override_is_tilde_expanded() {
        let config = ToolKind::Pebbles
            .resolve_with(
                &ConfigOverrides::default(),
                Some(Path::new(HOME)),
                Some("~/jars/pebbles.json"),
            )
            .unwrap();
        assert_eq!(config.path, PathBuf::from("/home/tester/jars/pebbles.json"));
        assert_eq!(config.max_backups, 0);
    }

    #[test]
    fn blank_env_override_falls_back_to_default() {
        let config = ToolKind::Pebbles
            .resolve_with(&ConfigOverrides::default(), Some(Path::new(HOME)), Some("  "))
            .unwrap();
        assert_eq!(config.path, PathBuf::from("/home/tester/.gratitude_pebbles.json"));
    }

    #[test]
    fn explicit_override_wins_over_environment() {
        let overrides = ConfigOverrides {
            file: Some(PathBuf::from("/tmp/custom.json")),
            max_backups: Some(5),
        };
        let config = ToolKind::Pebbles
            .resolve_with(&overrides, Some(Path::new(HOME)), Some("/tmp/env.json"))
            .unwrap();
        assert_eq!(config.path, PathBuf::from("/tmp/custom.json"));
        assert_eq!(config.max_backups, 5);
    }

    #[test]
    fn cwd_tools_do_not_need_home() {
        let config = ToolKind::Jar
            .resolve_with(&ConfigOverrides::default(), None, None)
            .unwrap();
        assert_eq!(config.path, PathBuf::from("memories.json"));
    }

    #[test]
    fn home_tools_fail_without_home() {
        let err = ToolKind::Commits
            .resolve_with(&ConfigOverrides::default(), None, None)
            .unwrap_err();
        assert_eq!(err, ConfigError::NoHomeDir);
    }

    #[test]
    fn empty_file_override_is_rejected() {
        let overrides = ConfigOverrides {
            file: Some(PathBuf::new()),
            max_backups: None,
        };
        let err = ToolKind::Capsule
            .resolve_with(&overrides, None, None)
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyOverride);
    }

    #[test]
    fn backup_override_is_bounded() {
        let at_limit = ConfigOverrides {
            file: Some(PathBuf::from("/tmp/custom.json")),
            max_backups: Some(MAX_BACKUPS_LIMIT),
        };
        let config = ToolKind::Jar.resolve_with(&at_limit, None, None).unwrap();
        assert_eq!(config.max_backups, MAX_BACKUPS_LIMIT);

        let over = ConfigOverrides {
            max_backups: Some(MAX_BACKUPS_LIMIT + 1),
            ..at_limit
        };
        let err = ToolKind::Jar.resolve_with(&over, None, None).unwrap_err();
        assert_eq!(err, ConfigError::TooManyBackups(MAX_BACKUPS_LIMIT + 1));
    }
}
