use tracing::{debug, info, warn};

use crate::config::{JoinConfig, StyleConfig};
use crate::election::{ElectionRecord, PartyCode, RecordIndex, Winner};
use crate::join::{popup::popup_content, JoinReport, JoinedMap, PartyShare, RegionViewModel};
use crate::map::{CanonicalId, FeatureId, GeoFeature};
use crate::style::{color_for, RegionStyle};

/// Join boundary features with result records.
///
/// Total: exactly one view model per feature, in feature order, whether or not a
/// record matched. Missing identifiers, unknown party codes and unparseable shares
/// are absorbed here and only surface in the returned `JoinReport`.
pub fn join(features: &[GeoFeature], records: &[ElectionRecord], fields: &JoinConfig, style: &StyleConfig) -> JoinedMap {
    let index = RecordIndex::build(records, &fields.id_field);
    debug!(records = records.len(), indexed = index.len(), "built record index");

    let mut report = JoinReport {
        features: features.len(),
        records: records.len(),
        records_missing_id: index.missing_ids(),
        duplicate_ids: index.duplicates().to_vec(),
        ..JoinReport::default()
    };

    let regions = features.iter().enumerate()
        .map(|(i, feature)| {
            let id = FeatureId(i as u32);
            let canonical_id = CanonicalId::normalize(feature.property_text(&fields.reference_field).as_deref());
            if canonical_id.is_none() {
                report.features_missing_reference.push(id);
            }

            let record = canonical_id.as_ref()
                .and_then(|key| index.get(key))
                .map(|row| &records[row]);

            match record {
                Some(record) => matched_region(id, canonical_id, feature, record, style),
                None => {
                    debug!(feature = %id, reference = ?canonical_id.as_ref().map(|c| c.as_str()), "no matching record");
                    report.unmatched.push(id);
                    unmatched_region(id, canonical_id, feature, style)
                }
            }
        })
        .collect::<Vec<_>>();

    report.matched = regions.iter().filter(|r| r.matched).count();
    if !report.unmatched.is_empty() {
        warn!(unmatched = report.unmatched.len(), features = report.features, "features without a matching record");
    }
    info!(matched = report.matched, features = report.features, records = report.records, "joined results onto boundaries");

    JoinedMap::new(regions, report)
}

/// Positive vote shares for every known party, largest first (ties keep column order).
pub fn party_shares(record: &ElectionRecord) -> Vec<PartyShare> {
    let mut shares = PartyCode::ALL.into_iter()
        .filter_map(|party| {
            record.share(party)
                .filter(|&fraction| fraction > 0.0)
                .map(|fraction| PartyShare { party, fraction })
        })
        .collect::<Vec<_>>();
    shares.sort_by(|a, b| b.fraction.total_cmp(&a.fraction));
    shares
}

/// Resting style of a matched region from its winner and the winner's share in percent.
pub fn original_style(winner: &Winner, winner_percentage: f64, style: &StyleConfig) -> RegionStyle {
    style.resting(color_for(winner.label(), winner_percentage))
}

fn matched_region(
    id: FeatureId,
    canonical_id: Option<CanonicalId>,
    feature: &GeoFeature,
    record: &ElectionRecord,
    style: &StyleConfig,
) -> RegionViewModel {
    let winner = record.winner();
    let winner_percentage = record.winner_percentage();
    let party_shares = party_shares(record);
    let popup = popup_content(record, &winner, &party_shares);

    if winner.label().is_some() && winner.party().is_none() {
        debug!(feature = %id, winner = %winner, "winner outside the palette; using neutral fill");
    }

    RegionViewModel {
        id,
        canonical_id,
        matched: true,
        original_style: original_style(&winner, winner_percentage, style),
        winner,
        winner_percentage,
        party_shares,
        popup: Some(popup),
        extent: feature.extent(),
    }
}

fn unmatched_region(id: FeatureId, canonical_id: Option<CanonicalId>, feature: &GeoFeature, style: &StyleConfig) -> RegionViewModel {
    RegionViewModel {
        id,
        canonical_id,
        matched: false,
        winner: Default::default(),
        winner_percentage: 0.0,
        party_shares: Vec::new(),
        popup: None,
        original_style: style.unmatched,
        extent: feature.extent(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn record(value: Value) -> ElectionRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn shares_are_positive_and_descending() {
        let r = record(json!({
            "ENS": 0.3, "NFP": "0.25", "RN": 0.42, "ECO": 0, "DIV": -0.1, "REC": "n/a", "DVD": "NaN",
        }));
        let shares = party_shares(&r);
        let parties = shares.iter().map(|s| s.party).collect::<Vec<_>>();
        assert_eq!(parties, [PartyCode::Rn, PartyCode::Ens, PartyCode::Nfp]);
        assert!(shares.iter().all(|s| s.fraction > 0.0));
        assert!(shares.windows(2).all(|w| w[0].fraction > w[1].fraction));
    }

    #[test]
    fn ties_keep_column_order() {
        let r = record(json!({ "DVG": 0.2, "ENS": 0.2 }));
        let parties = party_shares(&r).iter().map(|s| s.party).collect::<Vec<_>>();
        assert_eq!(parties, [PartyCode::Ens, PartyCode::Dvg]);
    }

    #[test]
    fn unknown_winner_gets_neutral_fill() {
        let style = StyleConfig::default();
        let r = record(json!({ "Winner": "LR", "LR": 0.6 }));
        assert_eq!(r.winner(), Winner::Unlisted("LR".into()));
        assert_eq!(original_style(&r.winner(), r.winner_percentage(), &style).fill_color, crate::style::NEUTRAL_GREY);
    }
}
