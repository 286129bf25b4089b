//! CLI module for Courier
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the Courier server
//! - `history` - Inspect or clear the request history
//! - `templates` - List saved templates
//! - `groups` - List template groups
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server against a local Redis
//! courier serve --store redis
//!
//! # Show the ten most recent requests
//! courier history list --limit 10 --store redis
//!
//! # Generate shell completions
//! courier completions bash > ~/.bash_completion.d/courier
//! ```

pub mod completions;
pub mod config;
pub mod groups;
pub mod history;
pub mod output;
pub mod serve;
pub mod templates;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::{CourierConfig, StoreBackend};
use crate::history::DEFAULT_LIST_LIMIT;
use crate::store::{open_store, KvStore};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Courier - personal HTTP request tester
#[derive(Parser, Debug)]
#[command(
    name = "courier",
    version,
    about = "Personal HTTP request tester with history, templates and groups"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Courier server
    Serve(ServeArgs),
    /// Inspect request history
    #[command(subcommand)]
    History(HistoryCommands),
    /// Inspect saved templates
    #[command(subcommand)]
    Templates(TemplatesCommands),
    /// Inspect template groups
    #[command(subcommand)]
    Groups(GroupsCommands),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "courier.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "COURIER_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "COURIER_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COURIER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Storage backend (memory, redis)
    #[arg(long)]
    pub store: Option<StoreBackend>,

    /// Redis connection URL
    #[arg(long)]
    pub store_url: Option<String>,
}

/// Store selection shared by the inspection commands.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "courier.toml")]
    pub config: PathBuf,

    /// Storage backend (memory, redis)
    #[arg(long)]
    pub store: Option<StoreBackend>,

    /// Redis connection URL
    #[arg(long)]
    pub store_url: Option<String>,
}

impl StoreArgs {
    /// Resolve the store configuration (file, then env, then flags) and open it.
    pub async fn connect(&self) -> Result<Arc<dyn KvStore>, Box<dyn std::error::Error>> {
        let mut config = CourierConfig::load_or_default(&self.config)?.with_env_overrides();
        if let Some(backend) = self.store {
            config.store.backend = backend;
        }
        if let Some(ref url) = self.store_url {
            config.store.url = url.clone();
        }
        config.validate()?;
        Ok(open_store(&config.store).await?)
    }
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List recent requests, newest first
    List(HistoryListArgs),
    /// Remove every history entry
    Clear(HistoryClearArgs),
}

#[derive(Args, Debug)]
pub struct HistoryListArgs {
    /// Maximum number of entries (capped at 100)
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIST_LIMIT)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct HistoryClearArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Subcommand, Debug)]
pub enum TemplatesCommands {
    /// List saved templates
    List(ListArgs),
}

#[derive(Subcommand, Debug)]
pub enum GroupsCommands {
    /// List groups with their resolved templates
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "courier.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
