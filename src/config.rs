use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Directory the text export is written to when no output path is given
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }
}

fn default_export_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MENUPLAN__DATABASE__URL, DATABASE_URL)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("database.url", "sqlite:menuplan.db")?
            .set_default("database.max_connections", 1)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, a missing file is not an error
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MENUPLAN")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, max_connections: u32) -> Config {
        Config {
            database: DatabaseConfig {
                url: url.to_string(),
                max_connections,
            },
            observability: ObservabilityConfig::default(),
            planner: PlannerConfig::default(),
        }
    }

    #[test]
    fn test_validation_zero_connections() {
        assert!(config("sqlite:test.db", 0).validate().is_err());
    }

    #[test]
    fn test_validation_empty_url() {
        assert!(config("  ", 1).validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config("sqlite:test.db", 1).validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("menuplan.toml");
        std::fs::write(
            &path,
            "[database]\nurl = \"sqlite:from-file.db\"\nmax_connections = 3\n\n[planner]\nexport_dir = \"exports\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.planner.export_dir, "exports");
        assert_eq!(config.observability.log_level, "info");
    }
}
