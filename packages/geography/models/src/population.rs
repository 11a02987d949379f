//! County population reference table.
//!
//! Populations are configuration, not a hidden global: every consumer takes
//! a [`CountyPopulations`] value explicitly. [`CountyPopulations::california`]
//! builds the table observed in production (58 counties, ACS estimates).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// ACS population estimates for the 58 California counties.
const CALIFORNIA_COUNTIES: &[(&str, u64)] = &[
    ("Alameda", 1_682_353),
    ("Alpine", 1_204),
    ("Amador", 40_474),
    ("Butte", 211_632),
    ("Calaveras", 45_292),
    ("Colusa", 21_839),
    ("Contra Costa", 1_165_927),
    ("Del Norte", 27_743),
    ("El Dorado", 191_185),
    ("Fresno", 1_008_654),
    ("Glenn", 28_917),
    ("Humboldt", 136_463),
    ("Imperial", 179_702),
    ("Inyo", 19_016),
    ("Kern", 909_235),
    ("Kings", 152_486),
    ("Lake", 68_163),
    ("Lassen", 32_730),
    ("Los Angeles", 10_014_009),
    ("Madera", 156_255),
    ("Marin", 262_321),
    ("Mariposa", 17_131),
    ("Mendocino", 91_601),
    ("Merced", 281_202),
    ("Modoc", 8_700),
    ("Mono", 13_195),
    ("Monterey", 439_035),
    ("Napa", 138_019),
    ("Nevada", 102_241),
    ("Orange", 3_186_989),
    ("Placer", 404_739),
    ("Plumas", 19_790),
    ("Riverside", 2_418_185),
    ("Sacramento", 1_585_055),
    ("San Benito", 64_209),
    ("San Bernardino", 2_181_654),
    ("San Diego", 3_298_634),
    ("San Francisco", 873_965),
    ("San Joaquin", 779_233),
    ("San Luis Obispo", 282_424),
    ("San Mateo", 764_442),
    ("Santa Barbara", 448_229),
    ("Santa Clara", 1_936_259),
    ("Santa Cruz", 270_861),
    ("Shasta", 182_155),
    ("Sierra", 3_236),
    ("Siskiyou", 44_076),
    ("Solano", 453_491),
    ("Sonoma", 488_863),
    ("Stanislaus", 552_878),
    ("Sutter", 99_633),
    ("Tehama", 65_829),
    ("Trinity", 16_112),
    ("Tulare", 473_117),
    ("Tuolumne", 55_620),
    ("Ventura", 843_843),
    ("Yolo", 216_403),
    ("Yuba", 81_575),
];

/// Immutable county -> population mapping.
///
/// Shared read-only across all enhancement requests; zero and missing
/// populations are both treated as "cannot normalize" by consumers, so the
/// table never produces a division by zero downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountyPopulations(BTreeMap<String, u64>);

impl CountyPopulations {
    /// Builds the built-in California table.
    #[must_use]
    pub fn california() -> Self {
        CALIFORNIA_COUNTIES
            .iter()
            .map(|&(name, population)| (name.to_string(), population))
            .collect()
    }

    /// Looks up a county's population.
    #[must_use]
    pub fn get(&self, county: &str) -> Option<u64> {
        self.0.get(county).copied()
    }

    /// Whether the county appears in the table at all.
    #[must_use]
    pub fn contains(&self, county: &str) -> bool {
        self.0.contains_key(county)
    }

    /// Number of counties in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u64)> for CountyPopulations {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, u64>> for CountyPopulations {
    fn from(map: BTreeMap<String, u64>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn california_table_has_58_counties() {
        assert_eq!(CountyPopulations::california().len(), 58);
    }

    #[test]
    fn looks_up_known_county() {
        let populations = CountyPopulations::california();
        assert_eq!(populations.get("Los Angeles"), Some(10_014_009));
        assert!(populations.contains("Sierra"));
    }

    #[test]
    fn unknown_county_is_absent() {
        let populations = CountyPopulations::california();
        assert_eq!(populations.get("Atlantis"), None);
        assert!(!populations.contains("Atlantis"));
    }

    #[test]
    fn builds_from_iterator() {
        let populations: CountyPopulations =
            [("Test".to_string(), 100u64)].into_iter().collect();
        assert_eq!(populations.get("Test"), Some(100));
        assert_eq!(populations.len(), 1);
    }
}
