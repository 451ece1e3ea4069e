// Configuration module entry point
// Loads layered configuration and owns the shared application state

mod state;
mod types;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
#[cfg(test)]
pub use state::test_support;
pub use types::{Config, HttpConfig};

/// Config file used when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Builder carrying only the built-in defaults
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Boruto-API/1.0")?
            .set_default("http.enable_cors", false)?
            .set_default("static_files.images_dir", "resources/images")
    }

    /// Load configuration from specified file path (extension optional)
    ///
    /// Sources are layered: built-in defaults, then the file (if present),
    /// then `SERVER_`-prefixed environment variables using `__` for nesting.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, unaffected by files or the environment
    #[cfg(test)]
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults()?.build()?.try_deserialize()
    }

    /// Defaults plus a config file, without environment overrides
    #[cfg(test)]
    fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(config::File::with_name(config_path))
            .build()?
            .try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
