use serde::Serialize;

use crate::election::{PartyCode, Winner};
use crate::map::{CanonicalId, Extent, FeatureId};
use crate::style::RegionStyle;

/// Vote share of one party in a region, as a fraction in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartyShare {
    pub party: PartyCode,
    pub fraction: f64,
}

/// Display-ready view of one boundary feature after the join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionViewModel {
    pub id: FeatureId,
    pub canonical_id: Option<CanonicalId>,
    pub matched: bool,
    pub winner: Winner,
    /// Winner's share in percent (0-100); drives color intensity.
    pub winner_percentage: f64,
    /// Positive shares, largest first.
    pub party_shares: Vec<PartyShare>,
    /// Popup / side-panel markup; `None` for unmatched features.
    pub popup: Option<String>,
    /// Resting style, the reset target of every interaction.
    pub original_style: RegionStyle,
    pub extent: Option<Extent>,
}

/// Result of joining features with records, indexed by `FeatureId`.
#[derive(Debug, Clone, Default)]
pub struct JoinedMap {
    regions: Vec<RegionViewModel>,
    report: JoinReport,
}

impl JoinedMap {
    pub(crate) fn new(regions: Vec<RegionViewModel>, report: JoinReport) -> Self {
        Self { regions, report }
    }

    #[inline] pub fn len(&self) -> usize { self.regions.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.regions.is_empty() }

    pub fn get(&self, id: FeatureId) -> Option<&RegionViewModel> { self.regions.get(id.index()) }

    pub fn regions(&self) -> &[RegionViewModel] { &self.regions }

    pub(crate) fn regions_mut(&mut self) -> &mut [RegionViewModel] { &mut self.regions }

    pub fn report(&self) -> &JoinReport { &self.report }

    pub fn into_regions(self) -> Vec<RegionViewModel> { self.regions }

    /// Extent covering every region with geometry.
    pub fn extent(&self) -> Option<Extent> {
        self.regions.iter()
            .filter_map(|region| region.extent)
            .reduce(|a, b| a.union(&b))
    }
}

/// Data-quality diagnostics collected while joining.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinReport {
    pub features: usize,
    pub records: usize,
    pub matched: usize,
    /// Features whose reference code found no record (includes those without one).
    pub unmatched: Vec<FeatureId>,
    /// Features without a reference code at all.
    pub features_missing_reference: Vec<FeatureId>,
    /// Records without an identifier.
    pub records_missing_id: usize,
    /// Record ids that occur more than once; only the first occurrence is joined.
    pub duplicate_ids: Vec<CanonicalId>,
}
