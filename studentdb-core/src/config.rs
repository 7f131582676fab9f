use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StudentError};

/// Connection settings for the student database
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```toml
/// host = "db.internal"
/// password = "s3cret"
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Run `CREATE TABLE IF NOT EXISTS students` after connecting
    pub bootstrap_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "students_db".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            bootstrap_schema: true,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("bootstrap_schema", &self.bootstrap_schema)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load defaults, then the config file, then `STUDENTDB_*` environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var_os("STUDENTDB_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);

        let mut config = Self::from_file_or_default(&path)?;
        config.apply_env_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Get default config file path: ~/.studentdb/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studentdb/config.toml")
    }

    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            StudentError::config(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content)
            .map_err(|e| StudentError::config(format!("invalid TOML in {}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `STUDENTDB_HOST`, `STUDENTDB_PORT`, `STUDENTDB_DATABASE`,
    /// `STUDENTDB_USER`, `STUDENTDB_PASSWORD` and `STUDENTDB_BOOTSTRAP`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("STUDENTDB_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("STUDENTDB_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| StudentError::config(format!("STUDENTDB_PORT is not a port: {port}")))?;
        }
        if let Some(database) = lookup("STUDENTDB_DATABASE") {
            self.database = database;
        }
        if let Some(user) = lookup("STUDENTDB_USER") {
            self.user = user;
        }
        if let Some(password) = lookup("STUDENTDB_PASSWORD") {
            self.password = password;
        }
        if let Some(flag) = lookup("STUDENTDB_BOOTSTRAP") {
            self.bootstrap_schema = parse_bool(&flag).ok_or_else(|| {
                StudentError::config(format!("STUDENTDB_BOOTSTRAP is not a boolean: {flag}"))
            })?;
        }
        Ok(())
    }

    /// sqlx connect options for a single connection.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .application_name("studentdb");

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    /// `user@host:port/database`, safe to print.
    pub fn display_target(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
