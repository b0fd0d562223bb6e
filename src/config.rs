//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `monitor.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ServerConfig: bind address for the HTTP surface.
//!     - DashboardConfig: where index.html and script.js live.
//!     - TipsConfig: path of the sqlite file the seeder writes.
//!     - LoggingConfig: default log level and reading verbosity.
//!
//! every section is optional; a partial file only overrides what it names.
//!
//! ==============================================================================

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// env var naming an explicit config file
pub const CONFIG_ENV: &str = "ENERGY_MONITOR_CONFIG";

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MonitorConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub tips: TipsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub template_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TipsConfig {
    pub database_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// log every ingested reading at info instead of debug
    pub show_sensor_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { template_dir: PathBuf::from("templates") }
    }
}

impl Default for TipsConfig {
    fn default() -> Self {
        Self { database_path: PathBuf::from("energy.db") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), show_sensor_data: true }
    }
}

impl ServerConfig {
    /// parsed bind address
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }
}

impl MonitorConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: MonitorConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;

        Ok(config)
    }

    /// Load the file named by ENERGY_MONITOR_CONFIG, which must succeed,
    /// otherwise fall back to the usual search paths and defaults.
    pub fn from_env_or_default() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let config = Self::load(&path)?;
                eprintln!("[CONFIG] Loaded from {}", Path::new(&path).display());
                Ok(config)
            }
            None => Ok(Self::load_or_default()),
        }
    }

    /// Load with default fallback
    ///
    /// runs before the tracing subscriber exists, so it reports to stderr.
    pub fn load_or_default() -> Self {
        let paths = [
            PathBuf::from("config").join("monitor.toml"),
            PathBuf::from("..").join("config").join("monitor.toml"),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        eprintln!("[CONFIG] Loaded from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        eprintln!("[CONFIG] Warning: Failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        eprintln!("[CONFIG] Warning: No config file found - using defaults");
        Self::default()
    }

    /// Log configuration summary
    pub fn print_summary(&self) {
        tracing::info!(
            "[CONFIG] listen={}:{} templates={} tips_db={} log_level={}",
            self.server.host,
            self.server.port,
            self.dashboard.template_dir.display(),
            self.tips.database_path.display(),
            self.logging.level,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_5000() {
        let config = MonitorConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.socket_addr().unwrap().to_string(), "0.0.0.0:5000");
        assert_eq!(config.dashboard.template_dir, PathBuf::from("templates"));
        assert_eq!(config.tips.database_path, PathBuf::from("energy.db"));
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.show_sensor_data);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [tips]
            database_path = "/var/lib/energy/tips.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tips.database_path, PathBuf::from("/var/lib/energy/tips.db"));
        assert_eq!(config.dashboard.template_dir, PathBuf::from("templates"));
    }

    #[test]
    fn load_reads_file_and_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[logging]\nlevel = \"debug\"\nshow_sensor_data = false\n").unwrap();
        let config = MonitorConfig::load(&good).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.show_sensor_data);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[server\nport = ").unwrap();
        assert!(MonitorConfig::load(&bad).is_err());
        assert!(MonitorConfig::load(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn bad_host_is_an_error() {
        let server = ServerConfig { host: "not a host".to_string(), port: 5000 };
        assert!(server.socket_addr().is_err());
    }
}
