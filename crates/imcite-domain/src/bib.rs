//! Bibliographic record types

use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap};

/// BibTeX entry kind (case-insensitive on parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Article,
    Book,
    Booklet,
    InBook,
    InCollection,
    InProceedings,
    Manual,
    MastersThesis,
    Misc,
    PhdThesis,
    Proceedings,
    TechReport,
    Unpublished,
    Unknown,
}

impl EntryKind {
    /// Parse a kind from an entry-type token.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "booklet" => Self::Booklet,
            "inbook" => Self::InBook,
            "incollection" => Self::InCollection,
            "inproceedings" | "conference" => Self::InProceedings,
            "manual" => Self::Manual,
            "mastersthesis" => Self::MastersThesis,
            "misc" => Self::Misc,
            "phdthesis" => Self::PhdThesis,
            "proceedings" => Self::Proceedings,
            "techreport" => Self::TechReport,
            "unpublished" => Self::Unpublished,
            _ => Self::Unknown,
        }
    }

    /// Canonical lowercase form; `Unknown` falls back to `misc`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::Booklet => "booklet",
            Self::InBook => "inbook",
            Self::InCollection => "incollection",
            Self::InProceedings => "inproceedings",
            Self::Manual => "manual",
            Self::MastersThesis => "mastersthesis",
            Self::Misc | Self::Unknown => "misc",
            Self::PhdThesis => "phdthesis",
            Self::Proceedings => "proceedings",
            Self::TechReport => "techreport",
            Self::Unpublished => "unpublished",
        }
    }
}

/// One citation entry: named fields that callers reach for constantly,
/// plus a residual map preserving every other field verbatim.
///
/// Authors are stored as individual names (the BibTeX `author` field
/// split on ` and `), matching how listing and filtering consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BibEntry {
    pub kind: EntryKind,
    #[serde(default)]
    pub author: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl BibEntry {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            author: Vec::new(),
            title: None,
            year: None,
            fields: BTreeMap::new(),
        }
    }

    /// Set a field by its BibTeX key, routing the well-known ones to
    /// their typed slot. Keys are matched case-insensitively and
    /// residual keys stored lowercase.
    pub fn set_field(&mut self, key: &str, value: String) {
        match key.to_lowercase().as_str() {
            "author" => {
                self.author = value
                    .split(" and ")
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect();
            }
            "title" => self.title = Some(value),
            "year" => self.year = Some(value),
            key => {
                self.fields.insert(key.to_string(), value);
            }
        }
    }

    /// Read a field back in its BibTeX text form (authors re-joined
    /// with ` and `). Returns `None` for absent fields.
    pub fn field(&self, key: &str) -> Option<String> {
        match key.to_lowercase().as_str() {
            "author" if !self.author.is_empty() => Some(self.author.join(" and ")),
            "author" => None,
            "title" => self.title.clone(),
            "year" => self.year.clone(),
            key => self.fields.get(key).cloned(),
        }
    }

    /// All fields in encoding order: author, title, year, then the
    /// residual fields sorted by key.
    pub fn all_fields(&self) -> Vec<(&str, String)> {
        let mut out = Vec::with_capacity(3 + self.fields.len());
        if !self.author.is_empty() {
            out.push(("author", self.author.join(" and ")));
        }
        if let Some(title) = &self.title {
            out.push(("title", title.clone()));
        }
        if let Some(year) = &self.year {
            out.push(("year", year.clone()));
        }
        for (key, value) in &self.fields {
            out.push((key.as_str(), value.clone()));
        }
        out
    }
}

/// A bibliographic record: entries keyed by citekey.
///
/// A paper's record normally holds exactly one entry, keyed by the
/// paper's own citekey; the map form preserves whatever a decoded
/// file actually contained.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BibRecord {
    entries: BTreeMap<String, BibEntry>,
}

impl BibRecord {
    /// Record holding a single entry under `citekey`.
    pub fn single(citekey: impl Into<String>, entry: BibEntry) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(citekey.into(), entry);
        Self { entries }
    }

    pub fn insert(&mut self, citekey: impl Into<String>, entry: BibEntry) {
        self.entries.insert(citekey.into(), entry);
    }

    pub fn get(&self, citekey: &str) -> Option<&BibEntry> {
        self.entries.get(citekey)
    }

    pub fn contains(&self, citekey: &str) -> bool {
        self.entries.contains_key(citekey)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BibEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a BibRecord {
    type Item = (&'a String, &'a BibEntry);
    type IntoIter = btree_map::Iter<'a, String, BibEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_parse() {
        assert_eq!(EntryKind::parse("article"), EntryKind::Article);
        assert_eq!(EntryKind::parse("ARTICLE"), EntryKind::Article);
        assert_eq!(EntryKind::parse("conference"), EntryKind::InProceedings);
        assert_eq!(EntryKind::parse("webpage"), EntryKind::Unknown);
        assert_eq!(EntryKind::Unknown.as_str(), "misc");
    }

    #[test]
    fn test_author_split_and_join() {
        let mut entry = BibEntry::new(EntryKind::Article);
        entry.set_field("Author", "Page, Lawrence and Brin, Sergey".to_string());
        assert_eq!(entry.author, vec!["Page, Lawrence", "Brin, Sergey"]);
        assert_eq!(
            entry.field("author").as_deref(),
            Some("Page, Lawrence and Brin, Sergey")
        );
    }

    #[test]
    fn test_residual_fields_keep_value() {
        let mut entry = BibEntry::new(EntryKind::Article);
        entry.set_field("Journal", "Computer Networks".to_string());
        entry.set_field("title", "T".to_string());
        assert_eq!(entry.field("journal").as_deref(), Some("Computer Networks"));
        assert_eq!(entry.field("volume"), None);

        let keys: Vec<&str> = entry.all_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["title", "journal"]);
    }

    #[test]
    fn test_record_keyed_by_citekey() {
        let mut entry = BibEntry::new(EntryKind::Article);
        entry.set_field("title", "T".to_string());
        let record = BibRecord::single("Page99", entry);
        assert!(record.contains("Page99"));
        assert!(!record.contains("Brin01"));
        assert_eq!(record.get("Page99").unwrap().title.as_deref(), Some("T"));
    }
}
