use serde_json::Value;

use crate::error::Result;
use crate::filter::run;
use crate::geojson::GeoJson;

/// Parse a Feature or FeatureCollection from GeoJSON bytes.
pub fn read_geojson_bytes(bytes: &[u8]) -> Result<GeoJson> {
    let value: Value = serde_json::from_slice(bytes)?;
    GeoJson::try_from(value)
}

/// Parse a Feature or FeatureCollection from a GeoJSON string.
pub fn read_geojson_str(data: &str) -> Result<GeoJson> {
    let value: Value = serde_json::from_str(data)?;
    GeoJson::try_from(value)
}

/// Serialize to GeoJSON bytes, optionally pretty-printed.
pub fn write_geojson_bytes(geojson: GeoJson, pretty: bool) -> Result<Vec<u8>> {
    let value = Value::from(geojson);
    let bytes = if pretty { serde_json::to_vec_pretty(&value)? } else { serde_json::to_vec(&value)? };
    Ok(bytes)
}

/// Serialize to a GeoJSON string, optionally pretty-printed.
pub fn write_geojson_string(geojson: GeoJson, pretty: bool) -> Result<String> {
    let value = Value::from(geojson);
    let data = if pretty { serde_json::to_string_pretty(&value)? } else { serde_json::to_string(&value)? };
    Ok(data)
}

/// Read, filter and re-serialize in one step.
pub fn filter_geojson_bytes(bytes: &[u8], min_area: Option<f64>, pretty: bool) -> Result<Vec<u8>> {
    let geojson = read_geojson_bytes(bytes)?;
    write_geojson_bytes(run(geojson, min_area)?, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn invalid_json_is_a_json_error() {
        assert!(matches!(read_geojson_str("{ not json"), Err(FilterError::Json(_))));
    }

    #[test]
    fn bare_array_is_invalid_input() {
        assert!(matches!(read_geojson_bytes(b"[]"), Err(FilterError::InvalidInput)));
    }

    #[test]
    fn filter_bytes_strips_holes() {
        let input = br#"{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [
                    [[6, 6], [10, 6], [10, 10], [6, 10], [6, 6]],
                    [[7, 7], [8, 7], [8, 8], [7, 8], [7, 7]]
                ]
            }
        }"#;
        let output = filter_geojson_bytes(input, None, false).unwrap();
        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["geometry"]["coordinates"].as_array().unwrap().len(), 1);
        assert_eq!(value["properties"], serde_json::json!({}));
    }

    #[test]
    fn pretty_output_is_multiline() {
        let geojson = read_geojson_str(r#"{ "type": "FeatureCollection", "features": [] }"#).unwrap();
        let data = write_geojson_string(geojson, true).unwrap();
        assert!(data.contains('\n'));
        assert!(read_geojson_str(&data).is_ok());
    }
}
