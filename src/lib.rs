//! Courier - personal HTTP request tester
//!
//! Executes arbitrary HTTP requests on behalf of a browser client, records
//! every execution in a bounded newest-first history, and keeps saved
//! request templates and named groups of templates in a key-value store.

pub mod api;
pub mod cli;
pub mod config;
pub mod groups;
pub mod history;
pub mod ids;
pub mod logging;
pub mod metrics;
pub mod proxy;
pub mod store;
pub mod templates;
