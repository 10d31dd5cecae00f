pub mod report;
pub mod telegram;

pub use telegram::TelegramBot;
