//! Status Board - Telegram bot and companion Mini App for posting short
//! free-text statuses.
//!
//! This library provides all the functionality for the status board:
//! persistence, the status HTTP API, the Mini App page, and the Telegram
//! bot integration.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, and logging
//! - `storage`: SQLite-backed status and user records
//! - `web`: axum HTTP API and the Mini App page
//! - `telegram`: teloxide command dispatcher and the API client it uses

pub mod cli;
pub mod core;
pub mod storage;
pub mod telegram;
pub mod web;

// Re-export commonly used types for convenience
pub use core::{AppError, AppResult, Config};
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
pub use telegram::{schema, Command, HandlerDeps, StatusApi};
pub use web::{create_api_router, run_web_server, ApiState};
