// notifier/telegram/sender.rs

use crate::model::NotifyError;
use crate::notifier::telegram::TelegramBot;
use tracing::{info, warn};

/// Telegram's `sendMessage` text limit, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Splits `text` into chunks of at most `limit` UTF-16 units, breaking at
/// blank lines. A single paragraph longer than `limit` is cut at line
/// breaks, and a single overlong line at character boundaries.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        let pieces = if utf16_len(paragraph) > limit {
            split_oversized(paragraph, limit)
        } else {
            vec![paragraph.to_string()]
        };
        for piece in pieces {
            let joined_len = if current.is_empty() {
                utf16_len(&piece)
            } else {
                utf16_len(&current) + 2 + utf16_len(&piece)
            };
            if joined_len > limit && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(&piece);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_oversized(paragraph: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in paragraph.split('\n') {
        let line_len = utf16_len(line);
        if line_len > limit {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
            }
            for c in line.chars() {
                if current_len + c.len_utf16() > limit {
                    pieces.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(c);
                current_len += c.len_utf16();
            }
            continue;
        }
        let extra = if current.is_empty() { line_len } else { line_len + 1 };
        if current_len + extra > limit && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Sends a plain text message to one chat, in several messages when it is
/// over Telegram's length limit.
pub async fn send_text(bot: &TelegramBot, chat_id: i64, text: &str) -> Result<(), NotifyError> {
    let chunks = split_message(text, MAX_MESSAGE_LEN);
    let total = chunks.len();
    for (i, chunk) in chunks.into_iter().enumerate() {
        let params = [
            ("chat_id", chat_id.to_string()),
            ("text", chunk),
        ];
        let response = bot.client.post(bot.api_url("sendMessage")).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("❌ Telegram API responded [{}] on part {}/{}: {}", status, i + 1, total, body);
            return Err(NotifyError::Unreachable(status));
        }
        info!("✅ Telegram reply {}/{} sent to chat {} [{}]", i + 1, total, chat_id, status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{group_offers, ValuationSchedule};
    use crate::model::FlightOffer;
    use crate::notifier::report::ReportFormatter;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_message("Award space found!\n\nJFK", 4096), vec!["Award space found!\n\nJFK"]);
    }

    #[test]
    fn breaks_at_blank_lines_and_keeps_order() {
        let text = "aaaa\n\nbbbb\n\ncccc";
        assert_eq!(split_message(text, 10), vec!["aaaa\n\nbbbb", "cccc"]);
        assert_eq!(split_message(text, 4), vec!["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn oversized_paragraph_falls_back_to_lines_then_chars() {
        assert_eq!(split_message("ab\ncd\nef", 5), vec!["ab\ncd", "ef"]);
        assert_eq!(split_message("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn counts_utf16_units() {
        // each emoji is two UTF-16 units
        let chunks = split_message("😀😀😀", 4);
        assert_eq!(chunks, vec!["😀😀", "😀"]);
    }

    #[test]
    fn large_alias_report_fits_telegram_limit() {
        let offers: Vec<FlightOffer> = (0..30u32)
            .map(|i| {
                let origin = ["JFK", "LGA", "EWR"][(i % 3) as usize];
                FlightOffer::new(
                    "GOL".into(),
                    origin.into(),
                    "GRU".into(),
                    format!("{:02}:{:02}", i % 24, i % 60),
                    "17:45".into(),
                    Some(20_000 + i * 100),
                    Some(55_000 + i * 100),
                    812.4,
                )
                .unwrap()
            })
            .collect();
        let text = ReportFormatter::new(5.8, ValuationSchedule::default()).render(&group_offers(offers));
        assert!(utf16_len(&text) > MAX_MESSAGE_LEN);

        let chunks = split_message(&text, MAX_MESSAGE_LEN);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| utf16_len(c) <= MAX_MESSAGE_LEN));
        assert_eq!(chunks.join("\n\n"), text);
    }
}
