// Core structs: FlightOffer, SearchRequest, RawRecord and the error types
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// A normalized award offer. Always carries at least one positive cabin price.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOffer {
    airline: String,
    origin_code: String,
    dest_code: String,
    departure_time: String,
    arrival_time: String,
    economy_points: Option<u32>,
    business_points: Option<u32>,
    taxes_brl: f64,
}

/// Which cabins an offer has award space in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    BothCabins,
    EconomyOnly,
    BusinessOnly,
}

impl Coverage {
    /// Report order of the categories.
    pub const ORDER: [Coverage; 3] = [
        Coverage::BothCabins,
        Coverage::EconomyOnly,
        Coverage::BusinessOnly,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Coverage::BothCabins => "Economy + Business",
            Coverage::EconomyOnly => "Economy only",
            Coverage::BusinessOnly => "Business only",
        }
    }
}

impl FlightOffer {
    /// Builds an offer, or `None` when neither cabin has a positive price.
    ///
    /// Zero point values are treated as absent. Negative or non-finite taxes
    /// are clamped to zero since the raw sources only ever report amounts due.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        airline: String,
        origin_code: String,
        dest_code: String,
        departure_time: String,
        arrival_time: String,
        economy_points: Option<u32>,
        business_points: Option<u32>,
        taxes_brl: f64,
    ) -> Option<Self> {
        let economy_points = economy_points.filter(|p| *p > 0);
        let business_points = business_points.filter(|p| *p > 0);
        if economy_points.is_none() && business_points.is_none() {
            return None;
        }

        Some(Self {
            airline,
            origin_code: origin_code.to_uppercase(),
            dest_code: dest_code.to_uppercase(),
            departure_time,
            arrival_time,
            economy_points,
            business_points,
            taxes_brl: if taxes_brl.is_finite() && taxes_brl > 0.0 { taxes_brl } else { 0.0 },
        })
    }

    pub fn airline(&self) -> &str {
        &self.airline
    }

    pub fn origin_code(&self) -> &str {
        &self.origin_code
    }

    pub fn dest_code(&self) -> &str {
        &self.dest_code
    }

    pub fn departure_time(&self) -> &str {
        &self.departure_time
    }

    pub fn arrival_time(&self) -> &str {
        &self.arrival_time
    }

    pub fn economy_points(&self) -> Option<u32> {
        self.economy_points
    }

    pub fn business_points(&self) -> Option<u32> {
        self.business_points
    }

    pub fn taxes_brl(&self) -> f64 {
        self.taxes_brl
    }

    /// Cheaper of the two cabins.
    pub fn lowest_points(&self) -> u32 {
        match (self.economy_points, self.business_points) {
            (Some(e), Some(b)) => e.min(b),
            (Some(e), None) => e,
            (None, Some(b)) => b,
            // unreachable through `new`
            (None, None) => u32::MAX,
        }
    }

    pub fn coverage(&self) -> Coverage {
        match (self.economy_points, self.business_points) {
            (Some(_), Some(_)) => Coverage::BothCabins,
            (Some(_), None) => Coverage::EconomyOnly,
            _ => Coverage::BusinessOnly,
        }
    }
}

/// A parsed user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub origin_city: String,
    pub dest_code: String,
    pub date: NaiveDate,
    pub max_points: Option<u32>,
}

/// Key for one call against a raw offer source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
}

/// A single provider field: either already numeric or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl From<&str> for RawField {
    fn from(text: &str) -> Self {
        RawField::Text(text.to_string())
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

/// Provider record before normalization. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    pub airline: Option<RawField>,
    pub origin: Option<RawField>,
    pub destination: Option<RawField>,
    pub departure: Option<RawField>,
    pub arrival: Option<RawField>,
    pub economy_points: Option<RawField>,
    pub business_points: Option<RawField>,
    /// Taxes in BRL: a plain amount, or text like `R$ 1.234,56`.
    pub taxes: Option<RawField>,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("provider answered with status {0}")]
    InvalidResponse(reqwest::StatusCode),
    #[error("page parse error: {0}")]
    Parse(#[from] ParserError),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector `{0}`")]
    Selector(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram API error: {0}")]
    ApiError(#[from] reqwest::Error),
    #[error("Telegram API unreachable (status {0})")]
    Unreachable(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("query does not match ORIGIN-DEST YYYY-MM-DD [MAX=n]")]
    Malformed,
    #[error("`{0}` is not a calendar date")]
    InvalidDate(String),
    #[error("max points `{0}` is out of range")]
    InvalidMax(String),
}
