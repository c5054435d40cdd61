//! Results tables given as a JSON array of row objects.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;

use crate::election::ElectionRecord;

/// Parse a JSON array of objects into records. Null cells are dropped.
pub fn records_from_json(value: &Value) -> Result<Vec<ElectionRecord>> {
    let rows = value.as_array()
        .ok_or_else(|| anyhow!("[io::json] Expected an array of records"))?;

    rows.iter().enumerate()
        .map(|(i, row)| match row {
            Value::Object(fields) => Ok(ElectionRecord::new(
                fields.iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.trim().to_string(), v.clone()))
                    .collect(),
            )),
            _ => bail!("[io::json] Record at index {i} is not an object"),
        })
        .collect()
}

pub fn records_from_json_str(text: &str) -> Result<Vec<ElectionRecord>> {
    let value: Value = serde_json::from_str(text)
        .context("[io::json] Failed to parse records")?;
    records_from_json(&value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::election::PartyCode;

    use super::*;

    #[test]
    fn rows_become_records() -> Result<()> {
        let records = records_from_json(&json!([
            { "ID": 1001, "Winner": "RN", "RN": 0.42, "ENS": null },
            { "ID": "2A001", "Winner": "ens", "ENS": "0,31" },
        ]))?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("ID").as_deref(), Some("1001"));
        assert!(!records[0].fields().contains_key("ENS"));
        assert_eq!(records[1].share(PartyCode::Ens), Some(0.31));
        Ok(())
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(records_from_json(&json!({ "ID": 1 })).is_err());
        let err = records_from_json(&json!([{}, 3])).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }
}
