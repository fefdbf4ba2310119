//! Record types shared across the imcite paper library
//!
//! Every paper is addressed by a citekey and carries up to three
//! artifacts: a metadata record (tags, added date, attached document
//! path), a bibliographic record (citation fields keyed by citekey),
//! and an optional document file. This crate holds the typed forms of
//! the first two; storage and codecs live in `imcite-core`.

mod bib;
mod citekey;
mod metadata;

pub use bib::{BibEntry, BibRecord, EntryKind};
pub use citekey::{validate_citekey, CitekeyError};
pub use metadata::Metadata;
