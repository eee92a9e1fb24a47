use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub log: LogConfig,
    pub registry: RegistryConfig,
}

/// Logging settings consumed by `utils::logging`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

/// Registry tuning knobs
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegistryConfig {
    /// Entry count past which registry growth is logged at warn level.
    /// Growth beyond this is legal; the warning exists because entries that
    /// are never reclaimed usually mean a context type without a working
    /// lifecycle hook.
    pub warn_capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "session-filters".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            warn_capacity: 10_000,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
