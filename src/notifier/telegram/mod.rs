pub mod command_handler;
pub mod listener;
pub mod sender;

use crate::model::NotifyError;
use crate::search::SearchOrchestrator;
use reqwest::Client;
use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use std::time::Instant;

pub struct TelegramBot {
    pub bot_token: String,
    pub client: Client,
    pub offset: AtomicI64,
    pub orchestrator: Arc<SearchOrchestrator>,
    pub start_time: Instant,
}

impl TelegramBot {
    pub fn new(bot_token: String, orchestrator: Arc<SearchOrchestrator>) -> Result<Self, NotifyError> {
        // long polling holds the request open for up to 30s
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(40))
            .build()?;
        Ok(Self {
            bot_token,
            client,
            offset: AtomicI64::new(0),
            orchestrator,
            start_time: Instant::now(),
        })
    }

    pub(crate) fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.bot_token, method)
    }

    pub async fn reply(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        sender::send_text(self, chat_id, text).await
    }

    pub async fn set_my_commands(&self) -> Result<(), NotifyError> {
        let commands = serde_json::json!({
            "commands": [
                { "command": "help", "description": "Query format" },
                { "command": "ping", "description": "Check connection" },
                { "command": "uptime", "description": "Service uptime" }
            ]
        });
        self.client
            .post(self.api_url("setMyCommands"))
            .json(&commands)
            .send()
            .await?;
        Ok(())
    }

    /// Polls for messages until the process stops.
    pub async fn run(self: Arc<Self>) {
        tracing::info!("▶️ Starting Telegram listener...");
        listener::listen_for_commands(self).await;
        tracing::info!("🛑 Telegram listener ended.");
    }
}
