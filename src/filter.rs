use serde_json::Value;
use tracing::{debug, trace};

use crate::area::ring_area;
use crate::error::{FilterError, Result};
use crate::geojson::{Feature, GeoJson, Geometry, PolygonCoords};

/// Resolve the caller's threshold. `None`, zero and NaN all mean "no
/// threshold", in which case every interior ring is removed.
fn threshold(min_area: Option<f64>) -> Option<f64> {
    min_area.filter(|a| *a != 0.0 && !a.is_nan())
}

/// Keep the exterior ring (index 0) and every interior ring whose area is
/// strictly greater than `min_area` square meters. Order is preserved.
pub fn filter_rings(rings: PolygonCoords, min_area: f64) -> PolygonCoords {
    rings.into_iter()
        .enumerate()
        .filter(|(i, ring)| {
            if *i == 0 { return true; }
            let area = ring_area(ring);
            let keep = area > min_area;
            debug!(ring = i, area, min_area, keep, "interior ring");
            keep
        })
        .map(|(_, ring)| ring)
        .collect()
}

/// Rewrite one polygon's rings in place. Returns the number of rings dropped.
fn strip_polygon(rings: &mut PolygonCoords, min_area: Option<f64>) -> usize {
    let before = rings.len();
    match min_area {
        Some(min_area) => *rings = filter_rings(std::mem::take(rings), min_area),
        None => rings.truncate(1),
    }
    before - rings.len()
}

/// Without a threshold the exterior ring is kept by index, so it has to exist.
fn ensure_exterior(rings: &PolygonCoords, kind: &str) -> Result<()> {
    if rings.is_empty() {
        return Err(FilterError::MalformedGeometry(format!("{kind} has no exterior ring")));
    }
    Ok(())
}

/// Rewrite a feature's polygonal geometry and report how many rings went.
fn strip_feature(feature: &mut Feature, min_area: Option<f64>) -> Result<usize> {
    let dropped = match feature.geometry.as_mut() {
        Some(Geometry::Polygon { coordinates, .. }) => {
            if min_area.is_none() { ensure_exterior(coordinates, "Polygon")?; }
            let dropped = strip_polygon(coordinates, min_area);
            trace!(dropped, "polygon");
            dropped
        }
        Some(Geometry::MultiPolygon { coordinates, .. }) => {
            if min_area.is_none() {
                coordinates.iter().try_for_each(|rings| ensure_exterior(rings, "MultiPolygon member"))?;
            }
            let dropped: usize = coordinates.iter_mut()
                .map(|rings| strip_polygon(rings, min_area))
                .sum();
            trace!(polygons = coordinates.len(), dropped, "multipolygon");
            dropped
        }
        Some(other) => {
            trace!(kind = ?other.type_name(), "geometry passed through");
            0
        }
        None => {
            trace!("null geometry passed through");
            0
        }
    };
    Ok(dropped)
}

/// Remove interior rings from a Polygon or MultiPolygon feature.
///
/// With a threshold, holes of at most `min_area` square meters are dropped;
/// without one (or with `0`), all holes are dropped. Any other geometry type,
/// and `geometry: null`, is left untouched. The feature is modified in place
/// and the same reference is handed back.
pub fn process_feature(feature: &mut Feature, min_area: Option<f64>) -> Result<&mut Feature> {
    strip_feature(feature, threshold(min_area))?;
    Ok(feature)
}

/// Filter interior rings in a Feature or every Feature of a FeatureCollection.
///
/// The input is consumed and handed back with its geometries rewritten;
/// feature count and order are preserved.
pub fn run(mut geojson: GeoJson, min_area: Option<f64>) -> Result<GeoJson> {
    let min_area = threshold(min_area);
    let dropped = match &mut geojson {
        GeoJson::FeatureCollection(collection) => {
            let mut dropped = 0;
            for feature in collection.features.iter_mut() {
                dropped += strip_feature(feature, min_area)?;
            }
            dropped
        }
        GeoJson::Feature(feature) => strip_feature(feature, min_area)?,
    };

    debug!(features = geojson.num_features(), dropped, min_area = ?min_area, "filtered rings");
    Ok(geojson)
}

/// [`run`] over untyped JSON.
///
/// Fails with [`FilterError::InvalidInput`] before touching anything when the
/// value is not a Feature or FeatureCollection.
pub fn run_value(value: Value, min_area: Option<f64>) -> Result<Value> {
    let geojson = GeoJson::try_from(value)?;
    Ok(run(geojson, min_area)?.into())
}
