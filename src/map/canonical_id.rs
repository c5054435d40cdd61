use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};

/// Matching key shared by boundary features and result records.
/// Holds the trimmed, lowercased identifier text; cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalId(Arc<str>);

impl CanonicalId {
    /// Canonicalize a raw identifier. Missing identifiers yield `None`, which never matches.
    ///
    /// Both sides of the join go through this one function, so any asymmetry in
    /// whitespace or letter case between the two datasets is absorbed here.
    pub fn normalize(raw: Option<&str>) -> Option<Self> {
        raw.map(|s| Self(Arc::from(s.trim().to_lowercase())))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CanonicalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
