use std::fmt;

use geo::{BoundingRect, MultiPolygon, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::value_as_text;

/// Handle of a boundary feature: its position in the loaded feature collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub u32);

impl FeatureId {
    #[inline] pub fn index(self) -> usize { self.0 as usize }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureId({})", self.0)
    }
}

/// Axis-aligned bounding box in the source coordinate system (lon/lat for GeoJSON input).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn width(&self) -> f64 { self.max_x - self.min_x }

    pub fn height(&self) -> f64 { self.max_y - self.min_y }

    /// Smallest extent covering both.
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

impl From<Rect<f64>> for Extent {
    fn from(rect: Rect<f64>) -> Self {
        Self { min_x: rect.min().x, min_y: rect.min().y, max_x: rect.max().x, max_y: rect.max().y }
    }
}

/// A boundary region as handed over by the geometry loader. Read-only to the join.
#[derive(Debug, Clone, Default)]
pub struct GeoFeature {
    properties: Map<String, Value>,
    geometry: Option<MultiPolygon<f64>>,
}

impl GeoFeature {
    pub fn new(properties: Map<String, Value>, geometry: Option<MultiPolygon<f64>>) -> Self {
        Self { properties, geometry }
    }

    /// Feature with attributes only (no shape to frame or draw).
    pub fn from_properties(properties: Map<String, Value>) -> Self {
        Self { properties, geometry: None }
    }

    #[inline] pub fn properties(&self) -> &Map<String, Value> { &self.properties }

    #[inline] pub fn geometry(&self) -> Option<&MultiPolygon<f64>> { self.geometry.as_ref() }

    /// Raw text of a property, if present and scalar.
    pub fn property_text(&self, field: &str) -> Option<String> {
        self.properties.get(field)
            .and_then(value_as_text)
            .map(|s| s.into_owned())
    }

    /// Bounding box of the geometry, if there is a non-empty one.
    pub fn extent(&self) -> Option<Extent> {
        self.geometry.as_ref()
            .and_then(|mp| mp.bounding_rect())
            .map(Extent::from)
    }
}
