use matterdocs_server::DocumentLogic;

use crate::{CliError, Format};

pub fn handle(logic: &dyn DocumentLogic, matter_id: &str, format: Format) -> Result<(), CliError> {
    let documents = logic.get_index(matter_id)?;

    match format {
        Format::Pretty => {
            println!("Documents in matter `{matter_id}`:");
            if documents.is_empty() {
                println!("  (none)");
            }
            for doc in &documents {
                println!("  {doc}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&documents)?),
    }

    Ok(())
}
