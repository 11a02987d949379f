//! County boundary loading from a `GeoJSON` county layer.

use crate::SourceError;

/// Parses a `GeoJSON` `FeatureCollection` of county boundary polygons.
///
/// The features are returned in document order; each is expected to carry a
/// `name` property matching the county identifiers used in rows, but that is
/// not enforced here — unnamed features take the enhancement pass's
/// degraded fallback instead.
///
/// # Errors
///
/// Returns [`SourceError::GeoJson`] on a malformed document and
/// [`SourceError::NotAFeatureCollection`] when the document is a bare
/// feature or geometry.
pub fn read_county_features(document: &str) -> Result<Vec<geojson::Feature>, SourceError> {
    let parsed: geojson::GeoJson = document.parse()?;

    match parsed {
        geojson::GeoJson::FeatureCollection(collection) => Ok(collection.features),
        geojson::GeoJson::Feature(_) => Err(SourceError::NotAFeatureCollection {
            kind: "Feature",
        }),
        geojson::GeoJson::Geometry(_) => Err(SourceError::NotAFeatureCollection {
            kind: "Geometry",
        }),
    }
}
