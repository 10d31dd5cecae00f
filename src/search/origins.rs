use std::collections::HashMap;

/// City alias -> ordered airport codes. Unknown cities expand to themselves.
#[derive(Debug, Clone, Default)]
pub struct OriginExpansion {
    aliases: HashMap<String, Vec<String>>,
}

impl OriginExpansion {
    pub fn new(aliases: HashMap<String, Vec<String>>) -> Self {
        let aliases = aliases
            .into_iter()
            .map(|(alias, codes)| {
                let codes = codes.into_iter().map(|c| c.trim().to_uppercase()).collect();
                (alias.trim().to_uppercase(), codes)
            })
            .collect();
        Self { aliases }
    }

    pub fn expand(&self, city: &str) -> Vec<String> {
        let city = city.trim().to_uppercase();
        match self.aliases.get(&city) {
            Some(codes) => codes.clone(),
            None => vec![city],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expansion() -> OriginExpansion {
        OriginExpansion::new(HashMap::from([(
            "nyc".to_string(),
            vec!["JFK".to_string(), "lga".to_string(), "EWR".to_string()],
        )]))
    }

    #[test]
    fn alias_expands_in_configured_order() {
        assert_eq!(expansion().expand("NYC"), vec!["JFK", "LGA", "EWR"]);
        assert_eq!(expansion().expand("nyc"), vec!["JFK", "LGA", "EWR"]);
    }

    #[test]
    fn unknown_city_is_its_own_origin() {
        assert_eq!(expansion().expand("MIA"), vec!["MIA"]);
    }
}
