use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub workshop: WorkshopConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    #[serde(default = "default_generated_orders")]
    pub generated_orders: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkshopConfig {
    #[serde(default = "default_specialty")]
    pub default_specialty: String,
    #[serde(default = "default_due_date")]
    pub default_due_date: String,
    /// When false, status mutations only validate and echo the stored order.
    #[serde(default = "default_true")]
    pub persist_status_updates: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: true,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            images_dir: default_images_dir(),
            generated_orders: default_generated_orders(),
        }
    }
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            default_specialty: default_specialty(),
            default_due_date: default_due_date(),
            persist_status_updates: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("WORKSHOP").separator("__"));
        let cfg = builder.build()?;
        let mut config: Config = cfg.try_deserialize()?;

        if env::var("WORKSHOP__APP__PORT").is_err() {
            if let Ok(port) = env::var("PORT") {
                config.app.port = port.trim().parse().map_err(|_| {
                    config::ConfigError::Message(format!("Invalid PORT value: {port}"))
                })?;
            }
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_generated_orders() -> usize {
    47
}

fn default_specialty() -> String {
    "General".to_string()
}

fn default_due_date() -> String {
    "2024-12-24".to_string()
}

#[cfg(test)]
mod tests {
    use super::Config;
    use config::ConfigError;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        env::remove_var("PORT");
        env::remove_var("WORKSHOP__APP__PORT");
        env::remove_var("WORKSHOP__WORKSHOP__PERSIST_STATUS_UPDATES");
    }

    #[test]
    #[serial]
    fn defaults_to_port_4000_and_in_memory_database() {
        clear_env_vars();

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(config.app.port, 4000);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.workshop.default_specialty, "General");
        assert_eq!(config.workshop.default_due_date, "2024-12-24");
        assert!(config.workshop.persist_status_updates);
        assert_eq!(config.seed.generated_orders, 47);
        assert_eq!(config.bind_address(), "0.0.0.0:4000");
    }

    #[test]
    #[serial]
    fn plain_port_variable_overrides_default() {
        clear_env_vars();
        env::set_var("PORT", "5050");

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(config.app.port, 5050);

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn prefixed_port_wins_over_plain_port() {
        clear_env_vars();
        env::set_var("PORT", "5050");
        env::set_var("WORKSHOP__APP__PORT", "6060");

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(config.app.port, 6060);

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn reads_nested_workshop_settings() {
        clear_env_vars();
        env::set_var("WORKSHOP__WORKSHOP__PERSIST_STATUS_UPDATES", "false");

        let config = Config::from_env().expect("expected configuration to load");

        assert!(!config.workshop.persist_status_updates);

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn errors_on_unparseable_port() {
        clear_env_vars();
        env::set_var("PORT", "north-pole");

        let error = Config::from_env().expect_err("expected configuration to fail");

        match error {
            ConfigError::Message(message) => {
                assert_eq!(message, "Invalid PORT value: north-pole".to_string())
            }
            other => panic!("unexpected error: {:?}", other),
        }

        clear_env_vars();
    }
}
