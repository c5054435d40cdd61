//! Hover, click and filter interactions over a joined map.

mod effect;
mod filter;
mod session;

pub use effect::Effect;
pub use filter::Filter;
pub use session::{RegionState, Session};
