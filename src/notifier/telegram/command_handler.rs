// notifier/telegram/command_handler.rs

use crate::notifier::telegram::TelegramBot;
use crate::search::{answer, query::USAGE};
use std::time::Duration;
use tracing::{info, warn};

/// Reply text for bot commands, `None` for anything that should be searched.
pub fn command_reply(command_text: &str, uptime: Duration) -> Option<String> {
    let command = command_text.split_whitespace().next().unwrap_or_default();
    // "/help@SomeBot" in group chats
    let command = command.split('@').next().unwrap_or_default();
    match command {
        "/start" | "/help" => Some(format!(
            "✈️ Send a route to search award space.\n{}",
            USAGE
        )),
        "/ping" => Some("✅ I am online!".to_string()),
        "/uptime" => Some(format!(
            "⏱ Uptime: {:02}:{:02}:{:02}",
            uptime.as_secs() / 3600,
            (uptime.as_secs() % 3600) / 60,
            uptime.as_secs() % 60
        )),
        _ => None,
    }
}

/// Handles one incoming chat message and replies in the same chat.
pub async fn handle_message(bot: &TelegramBot, chat_id: i64, text: &str) {
    info!("Handling message from {}: {}", chat_id, text);
    let reply = match command_reply(text, bot.start_time.elapsed()) {
        Some(reply) => reply,
        None => answer(bot.orchestrator.clone(), text).await,
    };
    if let Err(e) = bot.reply(chat_id, &reply).await {
        warn!("Reply to {} failed: {:?}", chat_id, e);
    }
}
