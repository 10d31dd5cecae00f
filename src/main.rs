mod analyzer;
mod config;
mod model;
mod normalizer;
mod notifier;
mod parser;
mod scraper;
mod search;

use crate::config::{config_path, load_config, AppConfig};
use crate::notifier::TelegramBot;
use crate::search::{answer, SearchOrchestrator};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let path = config_path();
    let config: AppConfig = match load_config(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", path, e);
            return;
        }
    };

    let source = match crate::scraper::build_source(&config) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to build offer source: {}", e);
            return;
        }
    };
    let orchestrator = Arc::new(SearchOrchestrator::new(source, &config));

    // One-shot mode: the query comes from the command line
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let text = answer(orchestrator, &args.join(" ")).await;
        println!("{}", text);
        return;
    }

    let Some(token) = config.telegram_bot_token.clone() else {
        error!("No query given and telegram_bot_token is not configured");
        return;
    };

    let bot = match TelegramBot::new(token, orchestrator) {
        Ok(bot) => Arc::new(bot),
        Err(e) => {
            error!("Failed to create Telegram client: {}", e);
            return;
        }
    };

    if let Err(e) = bot.set_my_commands().await {
        warn!("setMyCommands failed: {}", e);
    }
    info!("🚀 Award sniper started, waiting for queries...");
    bot.run().await;
}
