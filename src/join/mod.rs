//! Joining boundary features with result records into region view models.

mod engine;
mod popup;
mod view;

pub use engine::{join, original_style, party_shares};
pub(crate) use popup::{escape_html, popup_text};
pub use view::{JoinReport, JoinedMap, PartyShare, RegionViewModel};
