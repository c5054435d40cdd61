#![doc = "Electomap: joins election results to boundary regions and drives choropleth interaction"]
mod common;
mod config;
mod election;
mod error;
mod join;
mod load;
mod map;
mod session;
mod style;

pub mod io;

#[doc(inline)]
pub use map::{CanonicalId, Extent, FeatureId, GeoFeature};

#[doc(inline)]
pub use election::{ElectionRecord, PartyCode, RecordIndex, Winner};

#[doc(inline)]
pub use style::{color_for, interpolate_lab, party_color, Lab, RegionStyle, Rgb, NEUTRAL_GREY, SATURATION_PERCENTAGE};

#[doc(inline)]
pub use join::{join, original_style, party_shares, JoinReport, JoinedMap, PartyShare, RegionViewModel};

#[doc(inline)]
pub use session::{Effect, Filter, RegionState, Session};

#[doc(inline)]
pub use config::{Config, JoinConfig, StyleConfig};

#[doc(inline)]
pub use load::{LoadOutcome, Loaded, Loader};

#[doc(inline)]
pub use error::LoadError;
