//! Bot initialization and command registration
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command metadata registration with Telegram

use std::time::Duration;

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::error::AppResult;

/// HTTP timeout for Telegram API requests.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "I can do this:")]
pub enum Command {
    #[command(description = "welcome message and the Mini App link")]
    Start,
    #[command(description = "show the latest statuses")]
    Latest,
    #[command(description = "show your own recent statuses")]
    Mystatus,
}

/// Creates a Bot instance from an injected token
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to build the underlying HTTP client
pub fn create_bot(bot_token: &str) -> anyhow::Result<Bot> {
    if bot_token.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN environment variable not set"));
    }

    let client = ClientBuilder::new().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)).build()?;

    Ok(Bot::with_client(bot_token, client))
}

/// Registers bot commands in the Telegram UI
///
/// Called once at startup; Telegram shows the list in the command menu.
pub async fn setup_bot_commands(bot: &Bot) -> AppResult<()> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("start", "welcome message and the Mini App link"),
        BotCommand::new("latest", "show the latest statuses"),
        BotCommand::new("mystatus", "show your own recent statuses"),
    ])
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_descriptions_list_all_commands() {
        let commands = Command::descriptions();
        let command_list = format!("{}", commands);

        assert!(command_list.contains("start"));
        assert!(command_list.contains("latest"));
        assert!(command_list.contains("mystatus"));
    }

    #[test]
    fn create_bot_rejects_empty_token() {
        assert!(create_bot("").is_err());
    }
}
