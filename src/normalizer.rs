// Free-text normalization for provider fields: times, point counts, BRL amounts.
use crate::model::RawField;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("time pattern"));
static POINTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(\d{1,5})(?:\D|$)").expect("points pattern"));
static LONG_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{6,}").expect("long run pattern"));
static BRL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*(\d[\d.]*(?:,\d+)?)").expect("brl pattern"));
static AIRPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{3})\b").expect("airport pattern"));

/// First `H:MM`/`HH:MM` in `text` as zero-padded `HH:MM`, or empty.
pub fn normalize_time(text: &str) -> String {
    let Some(caps) = TIME_RE.captures(text) else {
        return String::new();
    };
    let hour: u32 = caps[1].parse().unwrap_or(u32::MAX);
    let minute: u32 = caps[2].parse().unwrap_or(u32::MAX);
    if hour > 23 || minute > 59 {
        return String::new();
    }
    format!("{:02}:{:02}", hour, minute)
}

/// Positive point count from a number or from the first 1-5 digit run in
/// text (dot thousands separators ignored). Anything else is absent, so a
/// six-digit fare in text such as `100.000 milhas` is not read as points.
pub fn parse_points(field: &RawField) -> Option<u32> {
    match field {
        RawField::Number(n) => {
            if n.is_finite() && *n >= 1.0 && *n <= u32::MAX as f64 {
                Some(n.round() as u32)
            } else {
                None
            }
        }
        RawField::Text(text) => {
            let compact = strip_thousands_dots(text);
            let points = POINTS_RE
                .captures(&compact)
                .and_then(|caps| caps[1].parse::<u32>().ok())
                .filter(|p| *p > 0);
            if points.is_none() && LONG_RUN_RE.is_match(&compact) {
                warn!("Ignoring point text with more than five digits: {:?}", text);
            }
            points
        }
    }
}

/// BRL amount from a number or a Brazilian-formatted `R$ 1.234,56` string.
/// Missing or unreadable amounts count as zero.
pub fn parse_brl(field: Option<&RawField>) -> f64 {
    let amount = match field {
        None => 0.0,
        Some(RawField::Number(n)) => *n,
        Some(RawField::Text(text)) => BRL_RE
            .captures(text)
            .and_then(|caps| caps[1].replace('.', "").replace(',', ".").parse::<f64>().ok())
            .unwrap_or(0.0),
    };
    if amount.is_finite() && amount > 0.0 { amount } else { 0.0 }
}

/// Airport code: the whole field when it is three letters, otherwise the
/// first standalone uppercase three-letter token.
pub fn parse_airport(field: &RawField) -> Option<String> {
    let RawField::Text(text) = field else {
        return None;
    };
    let trimmed = text.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(trimmed.to_ascii_uppercase());
    }
    AIRPORT_RE.captures(trimmed).map(|c| c[1].to_string())
}

/// Trimmed, uppercased carrier name, or `None` when blank.
pub fn parse_airline(field: &RawField) -> Option<String> {
    match field {
        RawField::Text(text) => {
            let name = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!name.is_empty()).then(|| name.to_uppercase())
        }
        RawField::Number(_) => None,
    }
}

fn strip_thousands_dots(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, c)| {
            !(*c == '.'
                && i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()))
        })
        .map(|(_, c)| *c)
        .collect()
}
