use std::{fmt, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::style::Rgb;

/// Party (or electoral list) codes carried by the results table, one column each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartyCode {
    Ens,
    Nfp,
    Rn,
    Udc,
    Rec,
    Eco,
    Dsv,
    Rdg,
    Dxg,
    Dvg,
    Dvc,
    Dvd,
    Reg,
    Div,
}

impl PartyCode {
    /// All codes, in the column order of the results table.
    pub const ALL: [PartyCode; 14] = [
        PartyCode::Ens, PartyCode::Nfp, PartyCode::Rn, PartyCode::Udc,
        PartyCode::Rec, PartyCode::Eco, PartyCode::Dsv, PartyCode::Rdg,
        PartyCode::Dxg, PartyCode::Dvg, PartyCode::Dvc, PartyCode::Dvd,
        PartyCode::Reg, PartyCode::Div,
    ];

    /// Column name / display label.
    pub fn as_str(self) -> &'static str {
        match self {
            PartyCode::Ens => "ENS",
            PartyCode::Nfp => "NFP",
            PartyCode::Rn  => "RN",
            PartyCode::Udc => "UDC",
            PartyCode::Rec => "REC",
            PartyCode::Eco => "ECO",
            PartyCode::Dsv => "DSV",
            PartyCode::Rdg => "RDG",
            PartyCode::Dxg => "DXG",
            PartyCode::Dvg => "DVG",
            PartyCode::Dvc => "DVC",
            PartyCode::Dvd => "DVD",
            PartyCode::Reg => "REG",
            PartyCode::Div => "DIV",
        }
    }

    /// Full-strength map color.
    pub fn base_color(self) -> Rgb {
        match self {
            PartyCode::Ens => Rgb::hex(0xF6B000), // yellow
            PartyCode::Nfp => Rgb::hex(0xFF4A52), // red
            PartyCode::Rn  => Rgb::hex(0x004A77), // navy
            PartyCode::Udc => Rgb::hex(0x71BBDE), // light blue
            PartyCode::Rec => Rgb::hex(0x0D0D0D),
            PartyCode::Eco => Rgb::hex(0x25DB96), // green
            PartyCode::Dsv => Rgb::hex(0x0089DE),
            PartyCode::Rdg => Rgb::hex(0xE6CB00),
            PartyCode::Dxg => Rgb::hex(0x932929),
            PartyCode::Dvg => Rgb::hex(0xD9116B),
            PartyCode::Dvc => Rgb::hex(0xE6CB00),
            PartyCode::Dvd => Rgb::hex(0x4D49F1),
            PartyCode::Reg => Rgb::hex(0xDCBDA0),
            PartyCode::Div => Rgb::hex(0x808080),
        }
    }

    /// Look up a code, ignoring surrounding whitespace and letter case.
    pub fn parse(code: &str) -> Option<PartyCode> {
        let code = code.trim();
        Self::ALL.into_iter().find(|p| p.as_str().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for PartyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartyCode::parse(s).ok_or_else(|| anyhow!("unknown party code {s:?}"))
    }
}

/// Leading party of a region as read from the `Winner` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Winner {
    /// A code from the fixed palette.
    Party(PartyCode),
    /// A non-empty label outside the palette, kept (uppercased) so it can still be filtered on.
    Unlisted(String),
    /// Missing or blank.
    #[default]
    Unknown,
}

impl Winner {
    /// Trim and uppercase a raw label, then classify it.
    pub fn from_label(raw: Option<&str>) -> Winner {
        let Some(label) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Winner::Unknown;
        };
        match PartyCode::parse(label) {
            Some(party) => Winner::Party(party),
            None => Winner::Unlisted(label.to_uppercase()),
        }
    }

    /// Canonical (uppercase) label, `None` when unknown.
    pub fn label(&self) -> Option<&str> {
        match self {
            Winner::Party(party) => Some(party.as_str()),
            Winner::Unlisted(label) => Some(label),
            Winner::Unknown => None,
        }
    }

    pub fn party(&self) -> Option<PartyCode> {
        match self {
            Winner::Party(party) => Some(*party),
            _ => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("Unknown"))
    }
}

impl Serialize for Winner {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.label() {
            Some(label) => serializer.serialize_str(label),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for party in PartyCode::ALL {
            assert_eq!(PartyCode::parse(party.as_str()), Some(party));
            assert_eq!(party.as_str().parse::<PartyCode>().unwrap(), party);
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(PartyCode::parse(" rn "), Some(PartyCode::Rn));
        assert_eq!(PartyCode::parse("Eco"), Some(PartyCode::Eco));
        assert_eq!(PartyCode::parse("LR"), None);
        assert_eq!(PartyCode::parse(""), None);
    }

    #[test]
    fn winner_classification() {
        assert_eq!(Winner::from_label(Some(" nfp ")), Winner::Party(PartyCode::Nfp));
        assert_eq!(Winner::from_label(Some("lr")), Winner::Unlisted("LR".into()));
        assert_eq!(Winner::from_label(Some("   ")), Winner::Unknown);
        assert_eq!(Winner::from_label(None), Winner::Unknown);
    }

    #[test]
    fn winner_labels() {
        assert_eq!(Winner::Party(PartyCode::Rn).label(), Some("RN"));
        assert_eq!(Winner::Unlisted("LR".into()).label(), Some("LR"));
        assert_eq!(Winner::Unknown.to_string(), "Unknown");
    }
}
