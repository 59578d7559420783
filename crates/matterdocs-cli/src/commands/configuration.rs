use config::ConfigError;
use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::CliError;

const CONFIG_TEMPLATE: &str = r#"# Application Configuration
app_settings:
  name: "matterdocs"
  port: "3000"
  host: "127.0.0.1"
  # development | testing | production
  environment: "development"
documents:
  fixture_path: "./documents.json"
"#;

pub fn create_config_template() -> Result<(), CliError> {
    write_config_template(Path::new(matterdocs_server::configuration::CONFIG_DIR))?;
    println!("✅ config.yml created successfully!");
    Ok(())
}

pub fn write_config_template(config_dir: &Path) -> Result<(), CliError> {
    let config_path = config_dir.join("config.yml");

    if config_path.exists() && !std::fs::read_to_string(&config_path)?.trim().is_empty() {
        return Err(ConfigError::Message(
            "Config file already exists and is not empty. Please remove or rename the existing config.yml file.".to_string(),
        )
        .into());
    }

    DirBuilder::new().recursive(true).create(config_dir)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&config_path)?;
    file.write_all(CONFIG_TEMPLATE.as_bytes())?;

    Ok(())
}
