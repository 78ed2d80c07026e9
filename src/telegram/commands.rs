//! Command handler implementations (/start, /latest, /mystatus)
//!
//! Every handler is stateless: it issues at most one HTTP call to the status
//! API and renders the result as chat text. Failures never propagate to the
//! user beyond a short apology; the cause is logged.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message};

use super::api::Status;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::Bot;

/// Handle /start command
///
/// Welcome message plus a button opening the Mini App. No backend call.
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let first_name = msg
        .from
        .as_ref()
        .map(|u| u.first_name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("there");

    let keyboard = InlineKeyboardMarkup::new([[InlineKeyboardButton::url(
        "Open the Mini App",
        deps.miniapp_url.clone(),
    )]]);

    bot.send_message(
        msg.chat.id,
        format!("Hello {first_name}! Welcome to Status Board, Use /latest to see recent statuses."),
    )
    .reply_markup(keyboard)
    .await?;

    Ok(())
}

/// Handle /latest command
pub(super) async fn handle_latest_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    match deps.api.latest().await {
        Ok(statuses) if statuses.is_empty() => {
            bot.send_message(msg.chat.id, "No statuses posted yet.").await?;
        }
        Ok(statuses) => {
            bot.send_message(msg.chat.id, format_latest(&statuses)).await?;
        }
        Err(e) => {
            log::error!("Failed to fetch latest statuses: {}", e);
            bot.send_message(msg.chat.id, "Sorry, something went wrong fetching the latest statuses.")
                .await?;
        }
    }

    Ok(())
}

/// Handle /mystatus command
///
/// Uses the invoking user's Telegram id; the empty state gets its own message
/// with a call-to-action button instead of an apology.
pub(super) async fn handle_mystatus_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let user_id = msg
        .from
        .as_ref()
        .map(|u| u.id.0.to_string())
        .unwrap_or_else(|| msg.chat.id.0.to_string());

    match deps.api.my_statuses(&user_id).await {
        Ok(statuses) if statuses.is_empty() => {
            let keyboard = InlineKeyboardMarkup::new([[InlineKeyboardButton::url(
                "Post your first status",
                deps.miniapp_url.clone(),
            )]]);
            bot.send_message(msg.chat.id, "You have not posted any statuses yet.")
                .reply_markup(keyboard)
                .await?;
        }
        Ok(statuses) => {
            bot.send_message(msg.chat.id, format_my_statuses(&statuses)).await?;
        }
        Err(e) => {
            log::error!("Failed to fetch statuses for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, "Sorry, something went wrong fetching your statuses.")
                .await?;
        }
    }

    Ok(())
}

/// Render the global list: "name: status" per record, newest first.
fn format_latest(statuses: &[Status]) -> String {
    let lines: Vec<String> = statuses.iter().map(|s| format!("{}: {}", s.name, s.status)).collect();
    format!("Latest statuses:\n\n{}", lines.join("\n\n"))
}

/// Render one user's list: only the status text per record.
fn format_my_statuses(statuses: &[Status]) -> String {
    let lines: Vec<&str> = statuses.iter().map(|s| s.status.as_str()).collect();
    format!("Your last statuses:\n\n{}", lines.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn status(name: &str, text: &str) -> Status {
        Status {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
            name: name.to_string(),
            status: text.to_string(),
            created_at: "2026-08-27T12:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn latest_rendering_joins_records_with_blank_lines() {
        let statuses = vec![status("Ann", "hi"), status("Ben", "lunch time")];
        assert_eq!(
            format_latest(&statuses),
            "Latest statuses:\n\nAnn: hi\n\nBen: lunch time"
        );
    }

    #[test]
    fn mystatus_rendering_shows_only_status_text() {
        let statuses = vec![status("Ann", "hi"), status("Ann", "bye")];
        assert_eq!(format_my_statuses(&statuses), "Your last statuses:\n\nhi\n\nbye");
    }
}
