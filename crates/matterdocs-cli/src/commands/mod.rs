pub mod configuration;
pub mod list;
pub mod server;

use camino::Utf8Path;
use matterdocs_server::{Document, InMemoryDocuments};
use tracing::{info, warn};

use crate::CliError;

/// Loads the document fixture, starting empty when the file doesn't exist yet.
pub fn load_documents(path: &Utf8Path) -> Result<InMemoryDocuments, CliError> {
    if !path.exists() {
        warn!("Document fixture `{path}` not found, serving no documents.");
        return Ok(InMemoryDocuments::default());
    }

    let content = std::fs::read_to_string(path)?;
    let documents: Vec<Document> = serde_json::from_str(&content)?;
    let logic = InMemoryDocuments::new(documents);

    info!(
        "Loaded documents for {} matters from `{path}`.",
        logic.matters().count()
    );
    Ok(logic)
}
