pub mod clierror;
pub mod commands;

pub use clierror::*;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use matterdocs_server::Environment;
use matterdocs_server::configuration::Settings;
use std::net::IpAddr;

pub use matterdocs_server::configuration::get_configuration;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(long = "log-level", default_value = "INFO", global = true)]
    pub loglevel: String,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Writes a configuration template to `configuration/config.yml`.
    Init,
    /// Starts the HTTP server.
    Serve {
        /// Interface to bind.
        #[clap(short = 'I', long)]
        interface: Option<IpAddr>,

        /// Port to listen on.
        #[clap(short = 'P', long)]
        port: Option<u16>,

        /// Environment to run under.
        #[arg(value_enum, short = 'E', long)]
        mode: Option<Mode>,

        /// JSON file with the documents to serve.
        #[clap(short = 'D', long)]
        documents: Option<Utf8PathBuf>,
    },
    /// Prints the documents of a matter.
    List {
        matter_id: String,

        #[arg(value_enum, short = 'F', long, default_value_t = Format::Pretty)]
        format: Format,

        /// JSON file with the documents to read.
        #[clap(short = 'D', long)]
        documents: Option<Utf8PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Development,
    Testing,
    Production,
}

impl From<Mode> for Environment {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Development => Environment::Development,
            Mode::Testing => Environment::Testing,
            Mode::Production => Environment::Production,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

/// Flags given on the command line take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub interface: Option<IpAddr>,
    pub port: Option<u16>,
    pub mode: Option<Mode>,
    pub documents: Option<Utf8PathBuf>,
}

impl ServerOverrides {
    #[must_use]
    pub fn apply(self, mut settings: Settings) -> Settings {
        if let Some(interface) = self.interface {
            settings.app_settings.host = interface;
        }
        if let Some(port) = self.port {
            settings.app_settings.port = port;
        }
        if let Some(mode) = self.mode {
            settings.app_settings.environment = mode.into();
        }
        if let Some(documents) = self.documents {
            settings.documents.fixture_path = documents;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use matterdocs_server::configuration::{ApplicationSettings, DocumentSettings};

    #[test]
    fn verify_cli() {
        <Cli as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::try_parse_from([
            "matterdocs", "serve", "-P", "4000", "-E", "production", "-D", "docs.json",
        ])
        .unwrap();

        match cli.command() {
            Command::Serve {
                port,
                mode,
                documents,
                interface,
            } => {
                assert_eq!(port, Some(4000));
                assert_eq!(mode, Some(Mode::Production));
                assert_eq!(documents.as_deref(), Some(camino::Utf8Path::new("docs.json")));
                assert_eq!(interface, None);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn list_defaults_to_pretty() {
        let cli = Cli::try_parse_from(["matterdocs", "list", "123"]).unwrap();
        assert!(matches!(
            cli.command(),
            Command::List { ref matter_id, format: Format::Pretty, .. } if matter_id == "123"
        ));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let settings = Settings {
            app_settings: ApplicationSettings::new(
                "matterdocs".into(),
                3000,
                "127.0.0.1".parse().unwrap(),
                Environment::Development,
            ),
            documents: DocumentSettings {
                fixture_path: "a.json".into(),
            },
        };

        let merged = ServerOverrides {
            port: Some(9000),
            mode: Some(Mode::Testing),
            ..Default::default()
        }
        .apply(settings);

        assert_eq!(merged.app_settings.port, 9000);
        assert_eq!(merged.app_settings.environment, Environment::Testing);
        assert_eq!(merged.app_settings.host.to_string(), "127.0.0.1");
        assert_eq!(merged.documents.fixture_path, "a.json");
    }
}
