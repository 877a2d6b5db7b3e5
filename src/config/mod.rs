use crate::core::ledger::DEFAULT_TARGET;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_utc_offset;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_target")]
    pub default_target: i64,
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_target() -> i64 {
    DEFAULT_TARGET
}
fn default_utc_offset() -> String {
    // Asia/Kolkata, no DST
    "+05:30".to_string()
}
fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_target: default_target(),
            utc_offset: default_utc_offset(),
            bind: default_bind(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("focusledger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".focusledger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("focusledger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("focusledger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the ledger cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.default_target <= 0 {
            return Err(AppError::Config(format!(
                "default_target must be > 0 (got {})",
                self.default_target
            )));
        }
        self.offset()?;
        Ok(())
    }

    /// The fixed timezone every "today" is computed in.
    pub fn offset(&self) -> AppResult<FixedOffset> {
        parse_utc_offset(&self.utc_offset)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Resolved database path. Relative names live next to the config file.
    pub fn database_path(&self) -> PathBuf {
        let p = expand_tilde(&self.database);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration and database files.
    /// Writes this config (unless in test mode) and returns the resolved database path.
    pub fn init_all(&self, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        let db_path = self.database_path();

        if !is_test {
            fs::create_dir_all(&dir)?;

            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..self.clone()
            };
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
