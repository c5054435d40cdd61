mod canonical_id;
mod feature;

pub use canonical_id::CanonicalId;
pub use feature::{Extent, FeatureId, GeoFeature};
