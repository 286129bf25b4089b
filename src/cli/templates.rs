//! Templates command implementation

use crate::cli::output::{format_templates_json, format_templates_table};
use crate::cli::ListArgs;
use crate::templates::TemplateRepository;

/// Handle `courier templates list` command
pub async fn handle_templates_list(args: &ListArgs) -> Result<String, Box<dyn std::error::Error>> {
    let store = args.store.connect().await?;
    let templates = TemplateRepository::new(store).list().await?;

    if args.json {
        Ok(format_templates_json(&templates)?)
    } else {
        Ok(format_templates_table(&templates))
    }
}
