//! Output formatting helpers for CLI commands

use crate::groups::{resolve_templates, Group};
use crate::history::HistoryEntry;
use crate::templates::Template;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

/// View model for group display, with template ids resolved to names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub id: String,
    pub name: String,
    pub template_ids: Vec<String>,
    pub templates: Vec<String>,
    /// Ids that no longer match a template
    pub dangling: usize,
}

impl GroupView {
    pub fn new(group: &Group, templates: &[Template]) -> Self {
        let resolved: Vec<String> = resolve_templates(group, templates)
            .into_iter()
            .map(|t| t.name.clone())
            .collect();
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            template_ids: group.template_ids.clone(),
            dangling: group.template_ids.len() - resolved.len(),
            templates: resolved,
        }
    }
}

/// Colored label for an entry's outcome: the upstream status, or the
/// transport error code.
pub fn outcome_label(entry: &HistoryEntry) -> String {
    match (&entry.response, &entry.error) {
        (Some(response), _) => {
            let label = response.status.to_string();
            match response.status {
                200..=299 => label.green().to_string(),
                300..=399 => label.cyan().to_string(),
                400..=499 => label.yellow().to_string(),
                _ => label.red().to_string(),
            }
        }
        (None, Some(error)) => error
            .code
            .as_deref()
            .unwrap_or("ERROR")
            .red()
            .to_string(),
        (None, None) => "?".to_string(),
    }
}

/// Format history entries as a table
pub fn format_history_table(entries: &[HistoryEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Method", "URL", "Status", "Duration"]);

    for e in entries {
        table.add_row(vec![
            Cell::new(e.timestamp.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(&e.method),
            Cell::new(&e.url),
            Cell::new(outcome_label(e)),
            Cell::new(format!("{}ms", e.duration_ms)),
        ]);
    }

    table.to_string()
}

/// Format history entries as JSON
pub fn format_history_json(entries: &[HistoryEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "history": entries }))
}

/// Format templates as a table
pub fn format_templates_table(templates: &[Template]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Method", "URL"]);

    for t in templates {
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(&t.name),
            Cell::new(&t.method),
            Cell::new(&t.url),
        ]);
    }

    table.to_string()
}

/// Format templates as JSON
pub fn format_templates_json(templates: &[Template]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "templates": templates }))
}

/// Format groups as a table
pub fn format_groups_table(groups: &[GroupView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Templates", "Missing"]);

    for g in groups {
        let missing = if g.dangling > 0 {
            g.dangling.to_string().yellow().to_string()
        } else {
            "0".to_string()
        };
        table.add_row(vec![
            Cell::new(&g.id),
            Cell::new(&g.name),
            Cell::new(g.templates.join(", ")),
            Cell::new(missing),
        ]);
    }

    table.to_string()
}

/// Format groups as JSON
pub fn format_groups_json(groups: &[GroupView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "groups": groups }))
}
