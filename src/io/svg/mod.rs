//! SVG export of the current map view.

mod draw;
mod writer;

pub use draw::{render_svg, SvgOptions};
#[cfg(feature = "files")]
pub use draw::write_svg;
