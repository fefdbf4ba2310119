//! The store contract shared by broker and cache

use imcite_domain::{BibRecord, Metadata};

use crate::error::Result;

/// Citekey-addressed record storage.
///
/// Implemented by [`DataBroker`] (straight to disk) and [`DataCache`]
/// (same contract behind an in-memory layer); callers pick one at the
/// seam and treat them interchangeably. Mutating operations take
/// `&mut self`: the store is single-threaded and session-scoped, one
/// open library per value.
///
/// [`DataBroker`]: crate::DataBroker
/// [`DataCache`]: crate::DataCache
pub trait RecordStore: std::fmt::Debug {
    /// Read a citekey's metadata record. Missing records are
    /// [`Error::NotFound`], never a default value.
    ///
    /// [`Error::NotFound`]: crate::Error::NotFound
    fn pull_metadata(&mut self, citekey: &str) -> Result<Metadata>;

    /// Read a citekey's bibliographic record. Same missing-record
    /// policy as [`pull_metadata`](Self::pull_metadata).
    fn pull_bibdata(&mut self, citekey: &str) -> Result<BibRecord>;

    /// Write (create or replace) a citekey's metadata record.
    fn push_metadata(&mut self, citekey: &str, meta: &Metadata) -> Result<()>;

    /// Write (create or replace) a citekey's bibliographic record.
    /// The record must contain an entry keyed by `citekey`.
    fn push_bibdata(&mut self, citekey: &str, record: &BibRecord) -> Result<()>;

    /// Whether the citekey exists. Bibliographic data alone qualifies;
    /// with `meta_check` the metadata record must be present too.
    /// Metadata is cheap scaffolding often written before a paper is
    /// fully qualified, so "complete and queryable" is the opt-in.
    fn exists(&self, citekey: &str, meta_check: bool) -> bool;

    /// All citekeys carrying a metadata record, sorted.
    fn citekeys(&self) -> Result<Vec<String>>;

    /// Attach the document at `source` (scheme or external path):
    /// copy it into the managed directory and record the new docpath
    /// in the citekey's metadata, creating a fresh record when none
    /// exists. Returns the recorded docpath.
    fn add_doc(&mut self, citekey: &str, source: &str) -> Result<String>;

    /// Detach and delete the document at `docpath`: remove the file
    /// (idempotently) and clear `docpath` on the owning citekey's
    /// metadata. Returns the citekey whose metadata was cleared, if
    /// any.
    fn remove_doc(&mut self, docpath: &str) -> Result<Option<String>>;
}
