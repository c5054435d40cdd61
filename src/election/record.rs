use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{value_as_number, value_as_text};
use crate::election::{PartyCode, Winner};
use crate::map::CanonicalId;

pub const ID_FIELD: &str = "ID";
pub const DEPARTMENT_FIELD: &str = "Department";
pub const CIRCONSCRIPTION_FIELD: &str = "Circonscription";
pub const PREVIOUS_FIELD: &str = "Previous";
pub const WINNER_FIELD: &str = "Winner";

/// One row of the results table: `ID`, `Department`, `Circonscription`, `Previous`,
/// `Winner` and one vote-share column per party code. Cells are kept as loaded
/// (text or number) and coerced on access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElectionRecord {
    fields: Map<String, Value>,
}

impl ElectionRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    #[inline] pub fn fields(&self) -> &Map<String, Value> { &self.fields }

    /// Raw text of a cell, if present and scalar.
    pub fn text(&self, field: &str) -> Option<String> {
        self.fields.get(field)
            .and_then(value_as_text)
            .map(|s| s.into_owned())
    }

    /// Numeric value of a cell; `None` if missing or unparseable.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(value_as_number)
    }

    /// Canonical identifier read from `id_field`.
    pub fn canonical_id(&self, id_field: &str) -> Option<CanonicalId> {
        CanonicalId::normalize(self.text(id_field).as_deref())
    }

    pub fn department(&self) -> Option<String> { self.non_blank(DEPARTMENT_FIELD) }

    pub fn circonscription(&self) -> Option<String> { self.non_blank(CIRCONSCRIPTION_FIELD) }

    pub fn previous(&self) -> Option<String> { self.non_blank(PREVIOUS_FIELD) }

    pub fn winner(&self) -> Winner {
        Winner::from_label(self.text(WINNER_FIELD).as_deref())
    }

    /// Vote share of a party as a fraction. Unparseable cells read as `None`.
    pub fn share(&self, party: PartyCode) -> Option<f64> {
        self.number(party.as_str())
    }

    /// Winner's vote share as a percentage (0-100), 0 when missing or unparseable.
    pub fn winner_percentage(&self) -> f64 {
        self.winner().label()
            .and_then(|label| self.number(label))
            .map_or(0.0, |fraction| fraction * 100.0)
    }

    fn non_blank(&self, field: &str) -> Option<String> {
        self.text(field).filter(|s| !s.trim().is_empty())
    }
}

impl From<Map<String, Value>> for ElectionRecord {
    fn from(fields: Map<String, Value>) -> Self { Self::new(fields) }
}
