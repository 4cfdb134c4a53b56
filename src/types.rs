//! Core types for the resource catalog reconciliation engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog resource.
///
/// Catalogs encode identifiers as integers; some exporters emit strings.
/// Both forms are accepted and compared verbatim, so `1` and `"1"` are
/// distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Text(String),
}

impl ResourceId {
    /// Whether this value is the integer root marker `0`.
    ///
    /// Only the integer form counts; a string `"0"` is an ordinary identifier.
    pub fn is_root_marker(&self) -> bool {
        matches!(self, ResourceId::Int(0))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        ResourceId::Int(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId::Text(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        ResourceId::Text(s)
    }
}

/// Sibling ordering hint. Lower values sort first; ties keep encounter order.
pub type SortKey = i64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_marker_is_integer_zero_only() {
        assert!(ResourceId::Int(0).is_root_marker());
        assert!(!ResourceId::Int(1).is_root_marker());
        assert!(!ResourceId::Text("0".to_string()).is_root_marker());
    }

    #[test]
    fn integer_and_string_forms_deserialize() {
        let int_id: ResourceId = serde_json::from_str("42").unwrap();
        let text_id: ResourceId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(int_id, ResourceId::Int(42));
        assert_eq!(text_id, ResourceId::Text("42".to_string()));
        assert_ne!(int_id, text_id);
    }
}
