use crate::model::FlightOffer;

/// Keeps offers whose cheaper cabin costs at most `ceiling` points.
/// Without a ceiling every offer passes. Input order is preserved.
pub fn filter_by_ceiling(offers: Vec<FlightOffer>, ceiling: Option<u32>) -> Vec<FlightOffer> {
    match ceiling {
        None => offers,
        Some(max) => offers
            .into_iter()
            .filter(|o| o.lowest_points() <= max)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(dep: &str, economy: Option<u32>, business: Option<u32>) -> FlightOffer {
        FlightOffer::new(
            "GOL".into(),
            "GRU".into(),
            "JFK".into(),
            dep.into(),
            String::new(),
            economy,
            business,
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn no_ceiling_keeps_everything() {
        let offers = vec![offer("08:00", Some(90_000), None), offer("09:00", None, Some(1))];
        assert_eq!(filter_by_ceiling(offers.clone(), None), offers);
    }

    #[test]
    fn uses_cheaper_cabin_inclusively() {
        let offers = vec![
            offer("01:00", Some(50_000), Some(90_000)),
            offer("02:00", Some(50_001), None),
            offer("03:00", None, Some(40_000)),
            offer("04:00", Some(70_000), Some(45_000)),
        ];
        let kept: Vec<_> = filter_by_ceiling(offers, Some(50_000))
            .iter()
            .map(|o| o.departure_time().to_string())
            .collect();
        assert_eq!(kept, vec!["01:00", "03:00", "04:00"]);
    }

    #[test]
    fn every_kept_offer_respects_ceiling() {
        let offers: Vec<_> = (1..=20u32)
            .map(|i| offer("10:00", Some(i * 5_000), (i % 3 == 0).then_some(i * 1_000)))
            .collect();
        for ceiling in [0, 4_999, 15_000, 60_000] {
            for o in filter_by_ceiling(offers.clone(), Some(ceiling)) {
                assert!(o.lowest_points() <= ceiling);
            }
        }
    }
}
