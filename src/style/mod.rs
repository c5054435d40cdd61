//! Choropleth colors and per-region path styles.

mod color;
mod encoder;
mod region_style;

pub use color::{interpolate_lab, Lab, Rgb};
pub use encoder::{color_for, party_color, NEUTRAL_GREY, SATURATION_PERCENTAGE};
pub use region_style::RegionStyle;
