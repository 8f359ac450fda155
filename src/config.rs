//! [`Config`]-related definitions.

use std::path::PathBuf;

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Prefix of environment variables overriding the configuration file,
/// e.g. `USERDIR__API__BASE_URL`.
pub const ENV_PREFIX: &str = "USERDIR";

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote directory configuration.
    pub api: Api,

    /// Session storage configuration.
    pub session: Session,

    /// User list controller configuration.
    pub controller: Controller,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if the file exists);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(File::with_name(path.as_ref()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// Remote directory configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL the `users` and `login` paths are joined onto.
    #[default("https://reqres.in/api".to_owned())]
    pub base_url: String,

    /// Value of the `x-api-key` header, if the directory wants one.
    pub api_key: Option<String>,

    /// Mailbox size of the directory actor.
    #[default(32)]
    pub mailbox_size: usize,
}

/// Session storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// File holding the login token.
    #[default(PathBuf::from(".user-directory-token"))]
    pub token_path: PathBuf,
}

/// User list controller configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Controller {
    /// Mailbox size of the controller actor.
    #[default(32)]
    pub mailbox_size: usize,

    /// Notifications buffered per subscriber before the oldest are dropped.
    #[default(16)]
    pub notification_capacity: usize,

    /// Also emit an error notification when a page fails to load.
    /// Failures are always logged.
    pub notify_fetch_failures: bool,
}

/// Log configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Log {
    /// Filter used when `RUST_LOG` is not set.
    #[default("info".to_owned())]
    pub level: String,
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn defaults_when_file_is_missing() {
        let config = Config::new("definitely-not-here.toml").unwrap();
        assert_eq!(config.api.base_url, "https://reqres.in/api");
        assert_eq!(config.api.api_key, None);
        assert_eq!(config.controller.mailbox_size, 32);
        assert!(!config.controller.notify_fetch_failures);
        assert_eq!(config.session.token_path, PathBuf::from(".user-directory-token"));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://localhost:9000/api"
api_key = "reqres-free-v1"

[controller]
notify_fetch_failures = true
"#
        )
        .unwrap();

        let config = Config::new(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api");
        assert_eq!(config.api.api_key.as_deref(), Some("reqres-free-v1"));
        assert!(config.controller.notify_fetch_failures);
        assert_eq!(config.controller.notification_capacity, 16);
    }
}
