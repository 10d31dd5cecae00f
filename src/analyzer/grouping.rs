use crate::model::{Coverage, FlightOffer};

/// Offers from one origin airport flown by one airline, sorted by departure.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub origin: String,
    pub airline: String,
    pub offers: Vec<FlightOffer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
    pub coverage: Coverage,
    pub buckets: Vec<Bucket>,
}

/// Offers laid out for rendering. Empty sections and buckets never appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedReport {
    pub sections: Vec<CategorySection>,
}

impl GroupedReport {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn offer_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.buckets)
            .map(|b| b.offers.len())
            .sum()
    }
}

/// Partitions offers by cabin coverage, then by (origin, airline) in
/// first-seen order, then sorts each bucket by departure time.
///
/// Times are compared as `HH:MM` strings; an empty time sorts first. The sort
/// is stable so equal times keep their input order.
pub fn group_offers(offers: Vec<FlightOffer>) -> GroupedReport {
    let mut sections: Vec<CategorySection> = Coverage::ORDER
        .iter()
        .map(|&coverage| CategorySection { coverage, buckets: Vec::new() })
        .collect();

    for offer in offers {
        let coverage = offer.coverage();
        let Some(section) = sections.iter_mut().find(|s| s.coverage == coverage) else {
            continue;
        };

        let existing = section
            .buckets
            .iter_mut()
            .find(|b| b.origin == offer.origin_code() && b.airline == offer.airline());
        match existing {
            Some(bucket) => bucket.offers.push(offer),
            None => section.buckets.push(Bucket {
                origin: offer.origin_code().to_string(),
                airline: offer.airline().to_string(),
                offers: vec![offer],
            }),
        }
    }

    for section in &mut sections {
        for bucket in &mut section.buckets {
            bucket
                .offers
                .sort_by(|a, b| a.departure_time().cmp(b.departure_time()));
        }
    }

    sections.retain(|s| !s.buckets.is_empty());
    GroupedReport { sections }
}
