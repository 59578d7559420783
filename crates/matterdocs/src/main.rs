use clap::Parser;
use matterdocs_cli::commands::{self, load_documents};
use matterdocs_cli::{Cli, CliError, Command, ExitOnError, ServerOverrides, get_configuration};
use matterdocs_server::telemetry::{get_subscriber, init_subscriber};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    init_subscriber(get_subscriber(&cli.loglevel))?;

    run_cli(&cli).or_exit();

    Ok(())
}

fn run_cli(cli: &Cli) -> Result<(), CliError> {
    match cli.command() {
        Command::Init => commands::configuration::create_config_template(),
        Command::Serve {
            interface,
            port,
            mode,
            documents,
        } => {
            let overrides = ServerOverrides {
                interface,
                port,
                mode,
                documents,
            };
            let settings = overrides.apply(get_configuration()?);
            commands::server::start_server(settings)
        }
        Command::List {
            matter_id,
            format,
            documents,
        } => {
            let fixture_path = match documents {
                Some(path) => path,
                None => get_configuration()?.documents.fixture_path,
            };
            let logic = load_documents(&fixture_path)?;
            commands::list::handle(&logic, &matter_id, format)
        }
    }
}
