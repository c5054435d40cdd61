//! GeoJSON FeatureCollections: boundary input and styled map export.

mod read;
mod write;

pub use read::{features_from_geojson, features_from_geojson_str};
pub use write::session_to_geojson;
#[cfg(feature = "files")]
pub use write::write_geojson;
