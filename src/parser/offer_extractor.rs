// Raw provider record -> FlightOffer
use crate::model::{FlightOffer, RawField, RawRecord, RouteRequest};
use crate::normalizer::{normalize_time, parse_airline, parse_airport, parse_brl, parse_points};
use tracing::debug;

pub struct OfferExtractor {
    fallback_airline: String,
}

impl OfferExtractor {
    pub fn new(fallback_airline: impl Into<String>) -> Self {
        Self {
            fallback_airline: fallback_airline.into(),
        }
    }

    /// Normalizes one record. Records without positive points in either
    /// cabin yield `None`. Airports missing from the record come from `route`.
    pub fn extract(&self, record: &RawRecord, route: &RouteRequest) -> Option<FlightOffer> {
        let economy = record.economy_points.as_ref().and_then(parse_points);
        let business = record.business_points.as_ref().and_then(parse_points);
        if economy.is_none() && business.is_none() {
            debug!("Dropping record without award space: {:?}", record);
            return None;
        }

        let airline = record
            .airline
            .as_ref()
            .and_then(parse_airline)
            .unwrap_or_else(|| self.fallback_airline.clone());
        let origin = record
            .origin
            .as_ref()
            .and_then(parse_airport)
            .unwrap_or_else(|| route.origin.clone());
        let destination = record
            .destination
            .as_ref()
            .and_then(parse_airport)
            .unwrap_or_else(|| route.destination.clone());

        FlightOffer::new(
            airline,
            origin,
            destination,
            time_of(record.departure.as_ref()),
            time_of(record.arrival.as_ref()),
            economy,
            business,
            parse_brl(record.taxes.as_ref()),
        )
    }

    pub fn extract_all(&self, records: &[RawRecord], route: &RouteRequest) -> Vec<FlightOffer> {
        records
            .iter()
            .filter_map(|r| self.extract(r, route))
            .collect()
    }
}

fn time_of(field: Option<&RawField>) -> String {
    match field {
        Some(RawField::Text(text)) => normalize_time(text),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn route() -> RouteRequest {
        RouteRequest {
            origin: "JFK".into(),
            destination: "GRU".into(),
            date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        }
    }

    #[test]
    fn extracts_structured_record() {
        let record = RawRecord {
            economy_points: Some(25000.0.into()),
            business_points: Some(50000.0.into()),
            departure: Some("08:00".into()),
            arrival: Some("05:30".into()),
            taxes: Some("R$ 800,00".into()),
            ..Default::default()
        };
        let offer = OfferExtractor::new("GOL").extract(&record, &route()).unwrap();
        assert_eq!(offer.airline(), "GOL");
        assert_eq!(offer.origin_code(), "JFK");
        assert_eq!(offer.dest_code(), "GRU");
        assert_eq!(offer.departure_time(), "08:00");
        assert_eq!(offer.arrival_time(), "05:30");
        assert_eq!(offer.economy_points(), Some(25000));
        assert_eq!(offer.business_points(), Some(50000));
        assert_eq!(offer.taxes_brl(), 800.0);
    }

    #[test]
    fn extracts_scraped_fragment() {
        let record = RawRecord {
            airline: Some("Azul".into()),
            origin: Some("Nova York (EWR)".into()),
            departure: Some("Saida 9:05".into()),
            business_points: Some("78.500 milhas".into()),
            economy_points: Some("Esgotado".into()),
            ..Default::default()
        };
        let offer = OfferExtractor::new("GOL").extract(&record, &route()).unwrap();
        assert_eq!(offer.airline(), "AZUL");
        assert_eq!(offer.origin_code(), "EWR");
        assert_eq!(offer.departure_time(), "09:05");
        assert_eq!(offer.arrival_time(), "");
        assert_eq!(offer.economy_points(), None);
        assert_eq!(offer.business_points(), Some(78500));
        assert_eq!(offer.taxes_brl(), 0.0);
    }

    #[test]
    fn drops_records_without_points() {
        let extractor = OfferExtractor::new("GOL");
        let empty = RawRecord::default();
        let zeroes = RawRecord {
            economy_points: Some(0.0.into()),
            business_points: Some("-".into()),
            ..Default::default()
        };
        assert!(extractor.extract(&empty, &route()).is_none());
        assert!(extractor.extract(&zeroes, &route()).is_none());
    }

    #[test]
    fn emitted_offers_always_have_positive_points() {
        let fields: Vec<Option<RawField>> = vec![
            None,
            Some(0.0.into()),
            Some((-5.0).into()),
            Some("nada".into()),
            Some("12000".into()),
            Some(30000.0.into()),
        ];
        let mut records = Vec::new();
        for e in &fields {
            for b in &fields {
                records.push(RawRecord {
                    economy_points: e.clone(),
                    business_points: b.clone(),
                    ..Default::default()
                });
            }
        }
        let offers = OfferExtractor::new("GOL").extract_all(&records, &route());
        // 6x6 grid minus the 4x4 block with no usable cabin
        assert_eq!(offers.len(), 36 - 16);
        for o in offers {
            assert!(o.economy_points().is_some_and(|p| p > 0) || o.business_points().is_some_and(|p| p > 0));
        }
    }
}
