//! History command implementation

use crate::cli::output::{format_history_json, format_history_table};
use crate::cli::{HistoryClearArgs, HistoryListArgs};
use crate::history::HistoryRepository;
use crate::store::KvStore;
use std::sync::Arc;

/// Handle `courier history list` command
pub async fn handle_history_list(
    args: &HistoryListArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let store = args.store.connect().await?;
    list_history(store, args.limit, args.json).await
}

/// Handle `courier history clear` command
pub async fn handle_history_clear(
    args: &HistoryClearArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let store = args.store.connect().await?;
    HistoryRepository::new(store).clear().await?;
    Ok("✓ History cleared".to_string())
}

async fn list_history(
    store: Arc<dyn KvStore>,
    limit: usize,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let entries = HistoryRepository::new(store).list(limit).await?;
    if json {
        Ok(format_history_json(&entries)?)
    } else {
        Ok(format_history_table(&entries))
    }
}
