use serde::Serialize;

use crate::map::{Extent, FeatureId};
use crate::style::RegionStyle;

/// Instruction for the rendering / UI layer, emitted by session transitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Apply a path style to a region.
    SetStyle { id: FeatureId, style: RegionStyle },
    /// Draw a region above its siblings.
    BringToFront { id: FeatureId },
    /// Replace the side-panel content.
    SidePanel { content: String },
    /// Frame the viewport on an extent.
    FitBounds { extent: Extent },
}
