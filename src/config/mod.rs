use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, parent_dir, resolve_under};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INTERVAL_DAYS: u32 = 14;
pub const DEFAULT_POSTPONE_DAYS: u32 = 7;
pub const DEFAULT_BACKUP_RETENTION: usize = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_interval")]
    pub default_interval_days: u32,
    #[serde(default = "default_postpone")]
    pub postpone_days: u32,
    /// Where rotated backups go; `<database dir>/backups` when unset.
    #[serde(default)]
    pub backup_dir: Option<String>,
    #[serde(default = "default_retention")]
    pub backup_retention: usize,
    #[serde(default = "default_true")]
    pub auto_backup: bool,
    /// Where `export` writes when no `--file` is given; the database dir when unset.
    #[serde(default)]
    pub export_dir: Option<String>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_interval() -> u32 {
    DEFAULT_INTERVAL_DAYS
}
fn default_postpone() -> u32 {
    DEFAULT_POSTPONE_DAYS
}
fn default_retention() -> usize {
    DEFAULT_BACKUP_RETENTION
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_interval_days: DEFAULT_INTERVAL_DAYS,
            postpone_days: DEFAULT_POSTPONE_DAYS,
            backup_dir: None,
            backup_retention: DEFAULT_BACKUP_RETENTION,
            auto_backup: true,
            export_dir: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("linentrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".linentrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("linentrack.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("linentrack.sqlite")
    }

    /// Load the configuration file, or the defaults when it does not exist.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        // An empty file deserializes to `null`, treat it as "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> AppResult<()> {
        if self.default_interval_days == 0 {
            return Err(AppError::Config(
                "default_interval_days must be at least 1".into(),
            ));
        }
        if self.postpone_days == 0 {
            return Err(AppError::Config("postpone_days must be at least 1".into()));
        }
        if self.backup_retention == 0 {
            return Err(AppError::Config("backup_retention must be at least 1".into()));
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn backup_dir(&self) -> PathBuf {
        let base = parent_dir(&self.database_path());
        match &self.backup_dir {
            Some(dir) => resolve_under(&base, dir),
            None => base.join("backups"),
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        let base = parent_dir(&self.database_path());
        match &self.export_dir {
            Some(dir) => resolve_under(&base, dir),
            None => base,
        }
    }

    /// Write the config file (creating its directory) and return its path.
    pub fn save(&self) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;
        let path = Self::config_file();
        fs::write(&path, self.to_yaml()?)?;
        Ok(path)
    }
}
