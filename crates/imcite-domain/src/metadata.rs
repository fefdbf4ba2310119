//! Per-paper metadata record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Non-bibliographic state attached to one citekey.
///
/// `docpath` points at the attached document, either inside the
/// library's managed document directory (`docsdir://...`) or as an
/// external path. Unknown keys found in a hand-edited metadata file
/// round-trip through `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub added: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub docpath: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Metadata {
    /// Fresh record for a paper added now, with no tags or document.
    pub fn new() -> Self {
        Self {
            added: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Whether a document is attached (managed or external).
    pub fn has_doc(&self) -> bool {
        self.docpath.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_records_added_date() {
        let meta = Metadata::new();
        assert!(meta.added.is_some());
        assert!(meta.tags.is_empty());
        assert!(!meta.has_doc());
    }

    #[test]
    fn test_default_is_fully_empty() {
        let meta = Metadata::default();
        assert_eq!(meta.added, None);
        assert_eq!(meta.docpath, None);
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let yaml = "added: null\ntags: [search, network]\ndocpath: null\nnotes: []\n";
        let meta: Metadata = serde_yaml::from_str(yaml).unwrap();
        assert!(meta.tags.contains("search"));
        assert!(meta.extra.contains_key("notes"));

        let out = serde_yaml::to_string(&meta).unwrap();
        let back: Metadata = serde_yaml::from_str(&out).unwrap();
        assert_eq!(meta, back);
    }
}
