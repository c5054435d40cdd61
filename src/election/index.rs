use ahash::AHashMap;
use tracing::warn;

use crate::election::ElectionRecord;
use crate::map::CanonicalId;

/// Lookup from canonical identifier to the first record carrying it.
#[derive(Debug, Default)]
pub struct RecordIndex {
    index: AHashMap<CanonicalId, usize>,
    duplicates: Vec<CanonicalId>,
    missing_ids: usize,
}

impl RecordIndex {
    /// Index `records` by their `id_field`. When several records share a canonical id,
    /// the earliest one wins and the id is reported in `duplicates()`.
    pub fn build(records: &[ElectionRecord], id_field: &str) -> Self {
        let mut out = Self::default();
        out.index.reserve(records.len());

        for (i, record) in records.iter().enumerate() {
            let Some(id) = record.canonical_id(id_field) else {
                out.missing_ids += 1;
                continue;
            };
            if out.index.contains_key(&id) {
                warn!(id = %id, row = i, "duplicate record id; keeping the first occurrence");
                out.duplicates.push(id);
            } else {
                out.index.insert(id, i);
            }
        }

        out
    }

    /// Position of the matching record, if any.
    pub fn get(&self, id: &CanonicalId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize { self.index.len() }

    pub fn is_empty(&self) -> bool { self.index.is_empty() }

    /// Canonical ids seen more than once (one entry per extra occurrence).
    pub fn duplicates(&self) -> &[CanonicalId] { &self.duplicates }

    /// Number of records without an identifier.
    pub fn missing_ids(&self) -> usize { self.missing_ids }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::election::record::ID_FIELD;

    fn records(values: serde_json::Value) -> Vec<ElectionRecord> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn first_match_wins() {
        let recs = records(json!([
            { "ID": "FR-01", "Winner": "RN" },
            { "ID": "fr-02", "Winner": "ENS" },
            { "ID": " fr-01", "Winner": "NFP" },
        ]));
        let index = RecordIndex::build(&recs, ID_FIELD);

        let id = CanonicalId::normalize(Some("fr-01")).unwrap();
        assert_eq!(index.get(&id), Some(0));
        assert_eq!(index.len(), 2);
        assert_eq!(index.duplicates(), &[id]);
    }

    #[test]
    fn records_without_id_are_skipped() {
        let recs = records(json!([{ "Winner": "RN" }, { "ID": null }, { "ID": "x" }]));
        let index = RecordIndex::build(&recs, ID_FIELD);
        assert_eq!(index.len(), 1);
        assert_eq!(index.missing_ids(), 2);
    }

    #[test]
    fn numeric_ids_are_indexed_as_text() {
        let recs = records(json!([{ "ID": 7501 }]));
        let index = RecordIndex::build(&recs, ID_FIELD);
        assert_eq!(index.get(&CanonicalId::normalize(Some("7501")).unwrap()), Some(0));
    }
}
