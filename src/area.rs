use geo::{ChamberlainDuquetteArea, Coord, LineString, Polygon};

use crate::geojson::Position;

/// Area of a single ring in square meters.
///
/// The ring is treated as the exterior of a hole-free polygon and measured with
/// the Chamberlain-Duquette spherical approximation over longitude/latitude
/// degrees. Closure and winding are not checked; positions with fewer than two
/// numbers are skipped.
pub fn ring_area(ring: &[Position]) -> f64 {
    let coords: Vec<Coord<f64>> = ring.iter()
        .filter_map(Position::lon_lat)
        .map(|(x, y)| Coord { x, y })
        .collect();

    Polygon::new(LineString::new(coords), vec![]).chamberlain_duquette_unsigned_area()
}
