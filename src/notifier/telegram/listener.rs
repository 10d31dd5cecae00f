// notifier/telegram/listener.rs

use crate::notifier::telegram::TelegramBot;
use crate::notifier::telegram::command_handler::handle_message;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::time::{sleep, Duration};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct TelegramApiResponse {
    pub result: Vec<TelegramUpdate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TelegramUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TelegramMessage {
    pub chat: TelegramChat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TelegramChat {
    pub id: i64,
}

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Decodes a `getUpdates` answer. Non-success statuses (401 bad token,
/// 409 another poller) and `{"ok":false}` bodies are errors.
pub(crate) fn decode_updates(status: StatusCode, body: &str) -> Result<Vec<TelegramUpdate>, String> {
    if !status.is_success() {
        return Err(format!("[{}] {}", status, body));
    }
    serde_json::from_str::<TelegramApiResponse>(body)
        .map(|r| r.result)
        .map_err(|e| format!("bad payload: {}", e))
}

/// Long-polls `getUpdates` and answers every text message on its own task.
/// Any failed poll waits before the next attempt.
pub async fn listen_for_commands(bot: Arc<TelegramBot>) {
    let url = bot.api_url("getUpdates");
    loop {
        let offset = bot.offset.load(Ordering::SeqCst);
        let response = bot
            .client
            .get(&url)
            .query(&[("offset", offset.to_string()), ("timeout", "30".to_string())])
            .send()
            .await;

        let resp = match response {
            Ok(resp) => resp,
            Err(e) => {
                warn!("getUpdates failed: {}", e);
                sleep(RETRY_DELAY).await;
                continue;
            }
        };
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        match decode_updates(status, &body) {
            Ok(updates) => {
                for update in updates {
                    bot.offset.store(update.update_id + 1, Ordering::SeqCst);
                    let Some(message) = update.message else { continue };
                    let chat_id = message.chat.id;
                    let Some(text) = message.text else { continue };
                    let bot = bot.clone();
                    tokio::spawn(async move {
                        handle_message(&bot, chat_id, &text).await;
                    });
                }
            }
            Err(e) => {
                warn!("getUpdates rejected: {}", e);
                sleep(RETRY_DELAY).await;
            }
        }
    }
}
