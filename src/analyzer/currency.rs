use serde::Deserialize;

/// Converts a BRL amount to whole US dollars.
///
/// Precondition: `amount` is finite and non-negative, `brl_per_usd` is finite
/// and positive (enforced when the config is loaded).
pub fn convert_to_usd(amount: f64, brl_per_usd: f64) -> i64 {
    (amount / brl_per_usd).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ValuationTier {
    /// Inclusive upper bound in points; `None` for the open-ended last tier.
    pub up_to: Option<u32>,
    /// USD per point.
    pub rate: f64,
}

/// Per-point value by tier. The whole balance is valued at the rate of the
/// single tier it falls in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<ValuationTier>")]
pub struct ValuationSchedule {
    tiers: Vec<ValuationTier>,
}

impl ValuationSchedule {
    pub fn new(tiers: Vec<ValuationTier>) -> Result<Self, String> {
        let Some(last) = tiers.last() else {
            return Err("valuation_tiers must not be empty".into());
        };
        if last.up_to.is_some() {
            return Err("last valuation tier must have up_to = null".into());
        }
        let mut previous: Option<u32> = None;
        for tier in &tiers[..tiers.len() - 1] {
            let Some(bound) = tier.up_to else {
                return Err("only the last valuation tier may be unbounded".into());
            };
            if previous.is_some_and(|p| bound <= p) {
                return Err(format!("valuation tier bound {} is not ascending", bound));
            }
            previous = Some(bound);
        }
        if let Some(bad) = tiers.iter().find(|t| !t.rate.is_finite() || t.rate < 0.0) {
            return Err(format!("invalid valuation rate {}", bad.rate));
        }
        Ok(Self { tiers })
    }

    pub fn rate_for(&self, points: u32) -> f64 {
        self.tiers
            .iter()
            .find(|t| t.up_to.is_none_or(|bound| points <= bound))
            .map(|t| t.rate)
            .unwrap_or_default()
    }

    /// Estimated USD value of `points`, rounded to cents.
    pub fn estimate_points_value(&self, points: u32) -> f64 {
        let value = points as f64 * self.rate_for(points);
        (value * 100.0).round() / 100.0
    }
}

impl TryFrom<Vec<ValuationTier>> for ValuationSchedule {
    type Error = String;

    fn try_from(tiers: Vec<ValuationTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl Default for ValuationSchedule {
    fn default() -> Self {
        Self {
            tiers: vec![
                ValuationTier { up_to: Some(20_000), rate: 0.0050 },
                ValuationTier { up_to: Some(40_000), rate: 0.0045 },
                ValuationTier { up_to: Some(60_000), rate: 0.0043 },
                ValuationTier { up_to: None, rate: 0.0040 },
            ],
        }
    }
}
