use electomap::{
    color_for, interpolate_lab, join, CanonicalId, Config, ElectionRecord, FeatureId, GeoFeature, PartyCode, Rgb,
    Winner, NEUTRAL_GREY,
};
use geo::{Coord, MultiPolygon, Rect};
use serde_json::{json, Value};

fn feature(properties: Value, min: (f64, f64)) -> GeoFeature {
    let rect = Rect::new(Coord { x: min.0, y: min.1 }, Coord { x: min.0 + 1.0, y: min.1 + 1.0 });
    GeoFeature::new(
        properties.as_object().cloned().unwrap_or_default(),
        Some(MultiPolygon(vec![rect.to_polygon()])),
    )
}

fn record(value: Value) -> ElectionRecord {
    serde_json::from_value(value).unwrap()
}

#[test]
fn worked_example_matches_across_case_and_whitespace() {
    let config = Config::default();
    let features = vec![feature(json!({ "REF": " FR-01 " }), (0.0, 0.0))];
    let records = vec![record(json!({ "ID": "fr-01", "Winner": "RN", "RN": 0.42, "ENS": 0.30 }))];

    let map = join(&features, &records, &config.join, &config.style);
    let region = map.get(FeatureId(0)).unwrap();

    assert!(region.matched);
    assert_eq!(region.canonical_id, CanonicalId::normalize(Some("fr-01")));
    assert_eq!(region.winner, Winner::Party(PartyCode::Rn));
    assert!((region.winner_percentage - 42.0).abs() < 1e-9);

    let shares = region.party_shares.iter().map(|s| (s.party, s.fraction)).collect::<Vec<_>>();
    assert_eq!(shares, [(PartyCode::Rn, 0.42), (PartyCode::Ens, 0.30)]);

    let expected = interpolate_lab(Rgb::WHITE, PartyCode::Rn.base_color(), 42.0 / 50.0);
    assert_eq!(region.original_style.fill_color, expected);
    assert_eq!(region.original_style.fill_opacity, 0.7);
    assert!(region.popup.as_deref().unwrap().contains("RN (42.0%)"));
    assert_eq!(map.report().matched, 1);
}

#[test]
fn numeric_reference_matches_text_id() {
    let config = Config::default();
    let features = vec![feature(json!({ "REF": 1001.0 }), (0.0, 0.0))];
    let records = vec![record(json!({ "ID": "1001", "Winner": "RN", "RN": 0.4 }))];

    let map = join(&features, &records, &config.join, &config.style);
    let region = map.get(FeatureId(0)).unwrap();

    assert!(region.matched);
    assert_eq!(region.canonical_id, CanonicalId::normalize(Some("1001")));
    assert_eq!(region.winner, Winner::Party(PartyCode::Rn));
}

#[test]
fn missing_reference_is_unmatched_and_grey() {
    let config = Config::default();
    let features = vec![
        feature(json!({ "NAME": "no ref" }), (0.0, 0.0)),
        feature(json!({ "REF": "FR-02" }), (1.0, 0.0)),
    ];
    let records = vec![record(json!({ "ID": "FR-01", "Winner": "ENS", "ENS": 0.5 }))];

    let map = join(&features, &records, &config.join, &config.style);

    for region in map.regions() {
        assert!(!region.matched);
        assert!(region.popup.is_none());
        assert_eq!(region.original_style.fill_color, NEUTRAL_GREY);
    }
    assert_eq!(map.report().features_missing_reference, [FeatureId(0)]);
    assert_eq!(map.report().unmatched, [FeatureId(0), FeatureId(1)]);
}

#[test]
fn join_is_total() {
    let config = Config::default();
    let features = (0..5)
        .map(|i| feature(json!({ "REF": format!("c{i}") }), (i as f64, 0.0)))
        .collect::<Vec<_>>();
    let records = vec![
        record(json!({ "ID": "C1", "Winner": "NFP", "NFP": 0.51 })),
        record(json!({ "ID": "c3", "Winner": "DIV", "DIV": "garbage" })),
        record(json!({ "Winner": "RN" })),
    ];

    let map = join(&features, &records, &config.join, &config.style);
    assert_eq!(map.len(), features.len());
    assert_eq!(map.regions().iter().map(|r| r.id).collect::<Vec<_>>(), (0..5).map(FeatureId).collect::<Vec<_>>());

    let matched = map.regions().iter().filter(|r| r.matched).map(|r| r.id.0).collect::<Vec<_>>();
    assert_eq!(matched, [1, 3]);

    // Unparseable share: no bars, zero percentage, grey fill.
    let c3 = map.get(FeatureId(3)).unwrap();
    assert!(c3.party_shares.is_empty());
    assert_eq!(c3.original_style.fill_color, NEUTRAL_GREY);
    assert_eq!(map.report().records_missing_id, 1);
}

#[test]
fn duplicate_ids_keep_the_first_record() {
    let config = Config::default();
    let features = vec![feature(json!({ "REF": "x" }), (0.0, 0.0))];
    let records = vec![
        record(json!({ "ID": "X", "Winner": "ENS", "ENS": 0.6 })),
        record(json!({ "ID": " x", "Winner": "RN", "RN": 0.6 })),
    ];

    let map = join(&features, &records, &config.join, &config.style);
    assert_eq!(map.get(FeatureId(0)).unwrap().winner, Winner::Party(PartyCode::Ens));
    assert_eq!(map.report().duplicate_ids, [CanonicalId::normalize(Some("x")).unwrap()]);
}

#[test]
fn custom_field_names() {
    let mut config = Config::default();
    config.join.reference_field = "code".into();
    config.join.id_field = "circ".into();

    let features = vec![feature(json!({ "code": 7501 }), (0.0, 0.0))];
    let records = vec![record(json!({ "circ": "7501", "Winner": "ECO", "ECO": 0.25 }))];

    let map = join(&features, &records, &config.join, &config.style);
    let region = map.get(FeatureId(0)).unwrap();
    assert!(region.matched);
    assert_eq!(region.original_style.fill_color, color_for(Some("ECO"), 25.0));
}

#[test]
fn extent_covers_all_regions() {
    let config = Config::default();
    let features = vec![
        feature(json!({ "REF": "a" }), (0.0, 0.0)),
        feature(json!({ "REF": "b" }), (4.0, 2.0)),
        GeoFeature::from_properties(json!({ "REF": "c" }).as_object().cloned().unwrap()),
    ];
    let map = join(&features, &[], &config.join, &config.style);
    let extent = map.extent().unwrap();
    assert_eq!((extent.min_x, extent.min_y, extent.max_x, extent.max_y), (0.0, 0.0, 5.0, 3.0));
    assert!(map.get(FeatureId(2)).unwrap().extent.is_none());
}
