#![doc = "Remove small interior rings (holes) from GeoJSON Polygons and MultiPolygons"]
mod area;
mod error;
mod filter;
mod geojson;
mod io;

#[doc(inline)]
pub use area::ring_area;

#[doc(inline)]
pub use error::{FilterError, Result};

#[doc(inline)]
pub use filter::{filter_rings, process_feature, run, run_value};

#[doc(inline)]
pub use geojson::{Feature, FeatureCollection, GeoJson, Geometry, MultiPolygonCoords, PolygonCoords, Position, Ring};

#[doc(inline)]
pub use io::{filter_geojson_bytes, read_geojson_bytes, read_geojson_str, write_geojson_bytes, write_geojson_string};
