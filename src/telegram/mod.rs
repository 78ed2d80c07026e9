//! Telegram bot integration: command definitions, dispatcher schema, and the
//! HTTP client the command handlers use to reach the status API.

pub mod api;
pub mod bot;
pub mod commands;
pub mod notifications;
pub mod schema;
pub mod types;

pub use teloxide::Bot;

pub use api::StatusApi;
pub use bot::{create_bot, setup_bot_commands, Command};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
