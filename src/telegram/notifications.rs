//! Outbound chat notifications.

use teloxide::prelude::*;

use crate::telegram::Bot;

/// Confirms a posted status to the poster via Telegram.
///
/// Runs as a detached task spawned after the HTTP response has been produced;
/// every failure ends here as a log line, never in the request path. User ids
/// that are not Telegram chat ids (non-numeric) are skipped.
pub async fn notify_status_posted(bot: Bot, user_id: String, status: String) {
    let chat_id = match user_id.parse::<i64>() {
        Ok(id) => ChatId(id),
        Err(_) => {
            log::debug!("Skipping notification: user id {:?} is not a Telegram chat id", user_id);
            return;
        }
    };

    let message = format!("Your status was posted: {status}");

    if let Err(e) = bot.send_message(chat_id, message).await {
        log::error!("Failed to send status notification to {}: {}", chat_id, e);
    } else {
        log::info!("Status notification sent to {}", chat_id);
    }
}
