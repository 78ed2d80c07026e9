//! Dispatcher schema
//!
//! Returns the handler tree used with teloxide's Dispatcher. Commands are
//! independent and stateless, so the schema is a single command branch.

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_latest_command, handle_mystatus_command, handle_start_command};
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema is used in production and in integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry().branch(command_handler(deps))
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                match cmd {
                    Command::Start => handle_start_command(&bot, &msg, &deps).await,
                    Command::Latest => handle_latest_command(&bot, &msg, &deps).await,
                    Command::Mystatus => handle_mystatus_command(&bot, &msg, &deps).await,
                }
            }
        })
}
