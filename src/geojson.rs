use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{FilterError, Result};

/// Longitude, latitude, then any extra dimensions.
///
/// Numbers are kept exactly as they were read, so integer input is written
/// back as integers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub Vec<Number>);

impl Position {
    /// Build a position from floats. `None` if any value is not finite.
    pub fn from_f64(values: &[f64]) -> Option<Self> {
        values.iter().map(|v| Number::from_f64(*v)).collect::<Option<Vec<_>>>().map(Position)
    }

    /// The first two numbers as `(longitude, latitude)`.
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        match self.0.as_slice() {
            [x, y, ..] => Some((x.as_f64()?, y.as_f64()?)),
            _ => None,
        }
    }
}

impl From<Position> for Value {
    fn from(position: Position) -> Self {
        Value::Array(position.0.into_iter().map(Value::Number).collect())
    }
}

/// Closed loop of positions; first and last are expected to be identical.
pub type Ring = Vec<Position>;

/// Rings of one polygon. Index 0 is the exterior ring, the rest are holes.
pub type PolygonCoords = Vec<Ring>;

pub type MultiPolygonCoords = Vec<PolygonCoords>;

/// A GeoJSON geometry object.
///
/// Only polygonal geometries are decoded; everything else is kept as the
/// original JSON so it can be written back unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Polygon {
        coordinates: PolygonCoords,
        /// The geometry object in input order (`type`, `bbox`, ...). The
        /// `coordinates` slot holds a placeholder until written back.
        members: Map<String, Value>,
    },
    MultiPolygon {
        coordinates: MultiPolygonCoords,
        members: Map<String, Value>,
    },
    Other(Value),
}

impl Geometry {
    pub fn polygon(coordinates: PolygonCoords) -> Self {
        Geometry::Polygon { coordinates, members: Map::new() }
    }

    pub fn multi_polygon(coordinates: MultiPolygonCoords) -> Self {
        Geometry::MultiPolygon { coordinates, members: Map::new() }
    }

    /// The GeoJSON `type` name, or `None` for an untyped pass-through value.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Geometry::Polygon { .. } => Some("Polygon"),
            Geometry::MultiPolygon { .. } => Some("MultiPolygon"),
            Geometry::Other(value) => value.get("type").and_then(Value::as_str),
        }
    }

    /// Decode a geometry object. Unknown types become `Geometry::Other`.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => return Ok(Geometry::Other(other)),
        };

        let kind = object.get("type").and_then(Value::as_str).map(str::to_owned);
        match kind.as_deref() {
            Some("Polygon") => {
                let coordinates = decode_coordinates(&mut object, "Polygon")?;
                Ok(Geometry::Polygon { coordinates, members: object })
            }
            Some("MultiPolygon") => {
                let coordinates = decode_coordinates(&mut object, "MultiPolygon")?;
                Ok(Geometry::MultiPolygon { coordinates, members: object })
            }
            _ => Ok(Geometry::Other(Value::Object(object))),
        }
    }
}

impl From<Geometry> for Value {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::Polygon { coordinates, members } => {
                typed_object("Polygon", members, "coordinates", polygon_to_value(coordinates))
            }
            Geometry::MultiPolygon { coordinates, members } => {
                let polygons = coordinates.into_iter().map(polygon_to_value).collect();
                typed_object("MultiPolygon", members, "coordinates", Value::Array(polygons))
            }
            Geometry::Other(value) => value,
        }
    }
}

/// Take `coordinates` out of a geometry object and decode it into rings.
fn decode_coordinates<T>(object: &mut Map<String, Value>, kind: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned + Positions,
{
    let raw = take_member(object, "coordinates")
        .ok_or_else(|| FilterError::MalformedGeometry(format!("{kind} has no coordinates")))?;
    let coordinates: T = serde_json::from_value(raw)
        .map_err(|e| FilterError::MalformedGeometry(format!("{kind} coordinates: {e}")))?;

    if coordinates.positions().any(|p| p.lon_lat().is_none()) {
        return Err(FilterError::MalformedGeometry(format!("{kind} position with fewer than two numbers")));
    }
    Ok(coordinates)
}

/// Flat iteration over every position of a coordinate structure.
trait Positions {
    fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_>;
}

impl Positions for PolygonCoords {
    fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        Box::new(self.iter().flatten())
    }
}

impl Positions for MultiPolygonCoords {
    fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        Box::new(self.iter().flatten().flatten())
    }
}

fn polygon_to_value(rings: PolygonCoords) -> Value {
    Value::from(rings)
}

/// Move a member's value out, leaving `null` in its slot so key order survives.
fn take_member(object: &mut Map<String, Value>, key: &str) -> Option<Value> {
    object.get_mut(key).map(Value::take)
}

/// Fill `type` and `key` back in. Existing keys keep their position.
fn typed_object(kind: &str, mut members: Map<String, Value>, key: &str, value: Value) -> Value {
    members.insert("type".to_string(), Value::from(kind));
    members.insert(key.to_string(), value);
    Value::Object(members)
}

/// A GeoJSON Feature: one (possibly null) geometry plus opaque properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// `None` for `"geometry": null`.
    pub geometry: Option<Geometry>,
    /// `None` when the input had no `properties` member at all.
    pub properties: Option<Value>,
    /// The feature object in input order (`type`, `id`, `bbox`, foreign
    /// members). `geometry` and `properties` slots hold placeholders.
    pub members: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Feature {
            geometry: Some(geometry),
            properties: Some(Value::Object(Map::new())),
            members: Map::new(),
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Self::from_object(object),
            _ => Err(FilterError::InvalidInput),
        }
    }

    fn from_object(mut object: Map<String, Value>) -> Result<Self> {
        let geometry = match take_member(&mut object, "geometry") {
            Some(Value::Null) => None,
            Some(value) => Some(Geometry::from_value(value)?),
            None => return Err(FilterError::MissingMember("geometry")),
        };
        let properties = take_member(&mut object, "properties");

        Ok(Feature { geometry, properties, members: object })
    }
}

impl From<Feature> for Value {
    fn from(feature: Feature) -> Self {
        let mut members = feature.members;
        members.insert("type".to_string(), Value::from("Feature"));
        if let Some(properties) = feature.properties {
            members.insert("properties".to_string(), properties);
        }
        let geometry = feature.geometry.map_or(Value::Null, Value::from);
        typed_object("Feature", members, "geometry", geometry)
    }
}

/// An ordered sequence of Features.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    /// The collection object in input order; `features` holds a placeholder.
    pub members: Map<String, Value>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection { features, members: Map::new() }
    }

    fn from_object(mut object: Map<String, Value>) -> Result<Self> {
        let Some(Value::Array(raw)) = take_member(&mut object, "features") else {
            return Err(FilterError::MissingMember("features"));
        };
        let features = raw.into_iter()
            .map(|value| match value {
                Value::Object(feature) => Feature::from_object(feature),
                _ => Err(FilterError::MalformedGeometry("feature is not an object".to_string())),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FeatureCollection { features, members: object })
    }
}

impl From<FeatureCollection> for Value {
    fn from(collection: FeatureCollection) -> Self {
        let features = collection.features.into_iter().map(Value::from).collect();
        typed_object("FeatureCollection", collection.members, "features", Value::Array(features))
    }
}

/// Top-level input: a single Feature or a FeatureCollection.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

impl GeoJson {
    /// Number of features carried (1 for a bare Feature).
    pub fn num_features(&self) -> usize {
        match self {
            GeoJson::Feature(_) => 1,
            GeoJson::FeatureCollection(collection) => collection.features.len(),
        }
    }
}

impl TryFrom<Value> for GeoJson {
    type Error = FilterError;

    /// Classify on `type`. Anything other than Feature or FeatureCollection
    /// (bare geometries, arrays, scalars) is `InvalidInput`.
    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(FilterError::InvalidInput);
        };
        let kind = object.get("type").and_then(Value::as_str).map(str::to_owned);
        match kind.as_deref() {
            Some("FeatureCollection") => Ok(GeoJson::FeatureCollection(FeatureCollection::from_object(object)?)),
            Some("Feature") => Ok(GeoJson::Feature(Feature::from_object(object)?)),
            _ => Err(FilterError::InvalidInput),
        }
    }
}

impl From<GeoJson> for Value {
    fn from(geojson: GeoJson) -> Self {
        match geojson {
            GeoJson::Feature(feature) => feature.into(),
            GeoJson::FeatureCollection(collection) => collection.into(),
        }
    }
}

impl From<Feature> for GeoJson {
    fn from(feature: Feature) -> Self { GeoJson::Feature(feature) }
}

impl From<FeatureCollection> for GeoJson {
    fn from(collection: FeatureCollection) -> Self { GeoJson::FeatureCollection(collection) }
}
