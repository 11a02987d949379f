#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County geography types and the population reference table.
//!
//! County boundary polygons arrive as `GeoJSON` features keyed by a `name`
//! property; this crate resolves that key and owns [`CountyPopulations`],
//! the injectable county -> population mapping used for per-capita
//! normalization.

pub mod population;

pub use population::CountyPopulations;

/// Resolves the county name from a boundary feature's `name` property.
///
/// Returns `None` when the property is missing or not a string.
#[must_use]
pub fn county_name(feature: &geojson::Feature) -> Option<&str> {
    feature
        .properties
        .as_ref()?
        .get("name")?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_named(name: &str) -> geojson::Feature {
        let mut properties = geojson::JsonObject::new();
        properties.insert("name".to_string(), serde_json::json!(name));
        geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    #[test]
    fn resolves_name_property() {
        let feature = feature_named("Fresno");
        assert_eq!(county_name(&feature), Some("Fresno"));
    }

    #[test]
    fn missing_properties_resolve_to_none() {
        let feature = geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert_eq!(county_name(&feature), None);
    }

    #[test]
    fn non_string_name_resolves_to_none() {
        let mut properties = geojson::JsonObject::new();
        properties.insert("name".to_string(), serde_json::json!(42));
        let feature = geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        };
        assert_eq!(county_name(&feature), None);
    }
}
