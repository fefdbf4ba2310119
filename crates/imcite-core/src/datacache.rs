//! Write-through caching layer over the data broker

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use imcite_domain::{BibRecord, Metadata};

use crate::databroker::DataBroker;
use crate::error::Result;
use crate::store::RecordStore;

/// Drop-in replacement for [`DataBroker`] that keeps decoded records
/// in memory for the lifetime of the session.
///
/// Two rules keep it coherent with the disk state:
/// - writes go through to the broker first and update the cached
///   entry only after they succeed, so the next pull returns the
///   just-written value without a storage round trip and a failed
///   push leaves the cache untouched;
/// - a citekey absent from a map only means "not loaded yet". Failed
///   pulls are never cached, so a record pushed between two pulls of
///   a previously missing citekey is picked up, at the cost of
///   repeated I/O for genuinely absent citekeys.
#[derive(Debug)]
pub struct DataCache {
    broker: DataBroker,
    metacache: HashMap<String, Metadata>,
    bibcache: HashMap<String, BibRecord>,
}

impl DataCache {
    /// Open a library at `root` behind a fresh, empty cache. The cache
    /// lives and dies with this value; nothing persists across runs.
    pub fn open(root: impl Into<PathBuf>, create: bool) -> Result<Self> {
        Ok(Self {
            broker: DataBroker::open(root, create)?,
            metacache: HashMap::new(),
            bibcache: HashMap::new(),
        })
    }
}

impl RecordStore for DataCache {
    fn pull_metadata(&mut self, citekey: &str) -> Result<Metadata> {
        if let Some(meta) = self.metacache.get(citekey) {
            debug!(citekey, "metadata cache hit");
            return Ok(meta.clone());
        }
        let meta = self.broker.pull_metadata(citekey)?;
        self.metacache.insert(citekey.to_string(), meta.clone());
        Ok(meta)
    }

    fn pull_bibdata(&mut self, citekey: &str) -> Result<BibRecord> {
        if let Some(record) = self.bibcache.get(citekey) {
            debug!(citekey, "bibdata cache hit");
            return Ok(record.clone());
        }
        let record = self.broker.pull_bibdata(citekey)?;
        self.bibcache.insert(citekey.to_string(), record.clone());
        Ok(record)
    }

    fn push_metadata(&mut self, citekey: &str, meta: &Metadata) -> Result<()> {
        self.broker.push_metadata(citekey, meta)?;
        self.metacache.insert(citekey.to_string(), meta.clone());
        Ok(())
    }

    fn push_bibdata(&mut self, citekey: &str, record: &BibRecord) -> Result<()> {
        self.broker.push_bibdata(citekey, record)?;
        self.bibcache.insert(citekey.to_string(), record.clone());
        Ok(())
    }

    // Cache population is lazy, so cache contents say nothing about
    // completeness; existence always comes from the broker.
    fn exists(&self, citekey: &str, meta_check: bool) -> bool {
        self.broker.exists(citekey, meta_check)
    }

    fn citekeys(&self) -> Result<Vec<String>> {
        self.broker.citekeys()
    }

    fn add_doc(&mut self, citekey: &str, source: &str) -> Result<String> {
        let docpath = self.broker.add_doc(citekey, source)?;
        if let Some(meta) = self.metacache.get_mut(citekey) {
            meta.docpath = Some(docpath.clone());
        }
        Ok(docpath)
    }

    fn remove_doc(&mut self, docpath: &str) -> Result<Option<String>> {
        let owner = self.broker.remove_doc(docpath)?;
        if let Some(citekey) = &owner {
            if let Some(meta) = self.metacache.get_mut(citekey) {
                meta.docpath = None;
            }
        }
        Ok(owner)
    }
}
