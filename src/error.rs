use thiserror::Error;

/// Errors raised while filtering GeoJSON rings.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The top-level object is neither a Feature nor a FeatureCollection.
    #[error("A Feature, or FeatureCollection is required")]
    InvalidInput,

    /// A Polygon or MultiPolygon whose coordinates cannot be read as rings.
    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    /// A required GeoJSON member is absent.
    #[error("Missing member: {0}")]
    MissingMember(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
