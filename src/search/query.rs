// Free-text query -> SearchRequest
use crate::model::{QueryError, SearchRequest};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub const USAGE: &str = "Format: NYC-GRU 2025-12-20 max=50000";

static QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]{3})-([A-Z]{3})\s+(\d{4}-\d{2}-\d{2})(?:\s+MAX=(\d+))?").expect("query pattern")
});

pub fn parse_query(text: &str) -> Result<SearchRequest, QueryError> {
    let text = text.trim().to_uppercase();
    let caps = QUERY_RE.captures(&text).ok_or(QueryError::Malformed)?;

    let date = NaiveDate::parse_from_str(&caps[3], "%Y-%m-%d")
        .map_err(|_| QueryError::InvalidDate(caps[3].to_string()))?;
    let max_points = match caps.get(4) {
        Some(m) => Some(
            m.as_str()
                .parse::<u32>()
                .map_err(|_| QueryError::InvalidMax(m.as_str().to_string()))?,
        ),
        None => None,
    };

    Ok(SearchRequest {
        origin_city: caps[1].to_string(),
        dest_code: caps[2].to_string(),
        date,
        max_points,
    })
}
