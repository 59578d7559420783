use camino::Utf8PathBuf;
use config::{ConfigError, Source};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::net::IpAddr;

use crate::Environment;

pub const CONFIG_DIR: &str = "configuration";

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub app_settings: ApplicationSettings,
    pub documents: DocumentSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    pub name: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: IpAddr,
    #[serde(default)]
    pub environment: Environment,
}

impl ApplicationSettings {
    #[must_use]
    pub fn new(name: String, port: u16, host: IpAddr, environment: Environment) -> Self {
        Self {
            name,
            port,
            host,
            environment,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DocumentSettings {
    pub fixture_path: Utf8PathBuf,
}

/// Loads `configuration/config.*` from the working directory, then applies
/// `APP_`-prefixed variables and `APP_ENVIRONMENT` on top of it.
///
/// # Errors
/// Fails if the working directory can't be determined, the file is missing
/// or the merged values don't fit [`Settings`].
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let config_dir = base_path.join(CONFIG_DIR);

    parse_configuration(
        config::File::from(config_dir.join("config")).required(true),
        app_variables(),
        std::env::var("APP_ENVIRONMENT").ok(),
    )
}

/// `APP_APP_SETTINGS__PORT=8080` sets `app_settings.port`.
pub fn app_variables() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

pub fn parse_configuration<S>(
    source: S,
    variables: config::Environment,
    environment_override: Option<String>,
) -> Result<Settings, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    config::Config::builder()
        .add_source(source)
        .add_source(variables)
        .set_override_option("app_settings.environment", environment_override)?
        .build()?
        .try_deserialize()
}
