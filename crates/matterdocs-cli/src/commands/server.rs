use matterdocs_server::configuration::Settings;
use matterdocs_server::startup::run_server;
use std::sync::Arc;
use std::time::Instant;

use crate::CliError;
use crate::commands::load_documents;

pub fn start_server(settings: Settings) -> Result<(), CliError> {
    let start = Instant::now();
    let logic = load_documents(&settings.documents.fixture_path)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_server(settings.app_settings, start, Arc::new(logic)))?;

    Ok(())
}
