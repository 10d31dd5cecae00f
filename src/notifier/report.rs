// Plain-text rendering of a grouped award report
use crate::analyzer::{convert_to_usd, GroupedReport, ValuationSchedule};
use crate::model::FlightOffer;

pub const NO_RESULTS: &str = "No award space found under your max points.";
pub const HEADLINE: &str = "Award space found!";

pub struct ReportFormatter {
    brl_per_usd: f64,
    valuation: ValuationSchedule,
}

impl ReportFormatter {
    pub fn new(brl_per_usd: f64, valuation: ValuationSchedule) -> Self {
        Self { brl_per_usd, valuation }
    }

    /// Renders sections, buckets and offers in the order given.
    pub fn render(&self, report: &GroupedReport) -> String {
        if report.is_empty() {
            return NO_RESULTS.to_string();
        }

        let mut out = String::new();
        out.push_str(HEADLINE);
        out.push('\n');
        for section in &report.sections {
            out.push_str(&format!("\n{}\n", section.coverage.title()));
            for (i, bucket) in section.buckets.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("{} · {}\n", bucket.origin, bucket.airline));
                for (j, offer) in bucket.offers.iter().enumerate() {
                    if j > 0 {
                        out.push('\n');
                    }
                    self.render_offer(&mut out, offer);
                }
            }
        }
        out.trim_end().to_string()
    }

    fn render_offer(&self, out: &mut String, offer: &FlightOffer) {
        out.push_str(&format!(
            "{} – {}\n",
            stop(offer.origin_code(), offer.departure_time()),
            stop(offer.dest_code(), offer.arrival_time())
        ));
        out.push_str(&format!(
            "  Economy: {} | Business: {}\n",
            points_or_dash(offer.economy_points()),
            points_or_dash(offer.business_points())
        ));
        out.push_str(&format!(
            "  {} points + ${} taxes\n",
            offer.lowest_points(),
            convert_to_usd(offer.taxes_brl(), self.brl_per_usd)
        ));
        if let Some(points) = offer.economy_points() {
            out.push_str(&format!("  Economy value ≈ ${:.2}\n", self.valuation.estimate_points_value(points)));
        }
        if let Some(points) = offer.business_points() {
            out.push_str(&format!("  Business value ≈ ${:.2}\n", self.valuation.estimate_points_value(points)));
        }
    }
}

fn stop(code: &str, time: &str) -> String {
    match to_12h(time) {
        t if t.is_empty() => code.to_string(),
        t => format!("{} {}", code, t),
    }
}

fn points_or_dash(points: Option<u32>) -> String {
    points.map_or_else(|| "-".to_string(), |p| p.to_string())
}

/// `HH:MM` to `h:mmam`/`h:mmpm`. Empty or unreadable input renders empty.
pub fn to_12h(time: &str) -> String {
    let Some((h, m)) = time.split_once(':') else {
        return String::new();
    };
    let (Ok(hour), Ok(minute)) = (h.parse::<u32>(), m.parse::<u32>()) else {
        return String::new();
    };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour < 12 { "am" } else { "pm" };
    format!("{}:{:02}{}", display_hour, minute, period)
}
