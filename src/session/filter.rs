use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::election::Winner;

/// Party filter selected in the UI: everything, or only regions won by one label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    /// Uppercased party label.
    Party(String),
}

impl Filter {
    /// Parse a selection value: `"all"` (any case) or a party label.
    /// Blank selections mean `All`.
    pub fn parse(selection: &str) -> Filter {
        let selection = selection.trim();
        if selection.is_empty() || selection.eq_ignore_ascii_case("all") {
            Filter::All
        } else {
            Filter::Party(selection.to_uppercase())
        }
    }

    /// Filter gate: whether a region won by `winner` stays visible.
    pub fn admits(&self, winner: &Winner) -> bool {
        match self {
            Filter::All => true,
            Filter::Party(label) => winner.label() == Some(label.as_str()),
        }
    }
}

impl FromStr for Filter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Filter::parse(s)) }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Party(label) => f.write_str(label),
        }
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::election::PartyCode;

    #[test]
    fn parses_selection_values() {
        assert_eq!(Filter::parse("all"), Filter::All);
        assert_eq!(Filter::parse(" ALL "), Filter::All);
        assert_eq!(Filter::parse(""), Filter::All);
        assert_eq!(Filter::parse("rn"), Filter::Party("RN".into()));
        assert_eq!(Filter::parse("RN").to_string(), "RN");
    }

    #[test]
    fn gate() {
        let rn = Winner::Party(PartyCode::Rn);
        assert!(Filter::All.admits(&rn));
        assert!(Filter::All.admits(&Winner::Unknown));
        assert!(Filter::parse("RN").admits(&rn));
        assert!(!Filter::parse("ENS").admits(&rn));
        assert!(!Filter::parse("RN").admits(&Winner::Unknown));
        assert!(Filter::parse("lr").admits(&Winner::Unlisted("LR".into())));
    }
}
