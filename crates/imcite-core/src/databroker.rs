//! The canonical per-citekey record API

use tracing::{debug, warn};

use imcite_domain::{BibRecord, Metadata};

use crate::codec::Codec;
use crate::content;
use crate::error::{Error, Result};
use crate::filebroker::FileBroker;
use crate::store::RecordStore;

/// Uncached store: every operation goes straight to the file broker
/// and through the codec.
#[derive(Debug)]
pub struct DataBroker {
    filebroker: FileBroker,
    codec: Codec,
}

impl DataBroker {
    /// Open a library at `root`, creating the layout when `create` is
    /// set.
    pub fn open(root: impl Into<std::path::PathBuf>, create: bool) -> Result<Self> {
        Ok(Self {
            filebroker: FileBroker::initialize(root, create)?,
            codec: Codec,
        })
    }

    /// The managed document directory of the open library.
    pub fn docsdir(&self) -> &std::path::Path {
        self.filebroker.docsdir()
    }
}

impl RecordStore for DataBroker {
    fn pull_metadata(&mut self, citekey: &str) -> Result<Metadata> {
        let bytes = self.filebroker.pull_metadata_raw(citekey)?;
        self.codec.decode_metadata(citekey, &bytes)
    }

    fn pull_bibdata(&mut self, citekey: &str) -> Result<BibRecord> {
        let bytes = self.filebroker.pull_bibdata_raw(citekey)?;
        self.codec.decode_bibdata(citekey, &bytes)
    }

    fn push_metadata(&mut self, citekey: &str, meta: &Metadata) -> Result<()> {
        let bytes = self.codec.encode_metadata(citekey, meta)?;
        self.filebroker.push_metadata_raw(citekey, &bytes)
    }

    fn push_bibdata(&mut self, citekey: &str, record: &BibRecord) -> Result<()> {
        if !record.contains(citekey) {
            return Err(Error::MismatchedCitekey(citekey.to_string()));
        }
        let bytes = self.codec.encode_bibdata(record);
        self.filebroker.push_bibdata_raw(citekey, &bytes)
    }

    fn exists(&self, citekey: &str, meta_check: bool) -> bool {
        let has_bib = self.filebroker.exists_bib(citekey);
        if meta_check {
            has_bib && self.filebroker.exists_meta(citekey)
        } else {
            has_bib
        }
    }

    fn citekeys(&self) -> Result<Vec<String>> {
        self.filebroker.citekeys()
    }

    fn add_doc(&mut self, citekey: &str, source: &str) -> Result<String> {
        let docpath = self.filebroker.copy_doc_in(citekey, source)?;
        let mut meta = match self.pull_metadata(citekey) {
            Ok(meta) => meta,
            Err(err) if err.is_not_found() => Metadata::new(),
            Err(err) => return Err(err),
        };
        meta.docpath = Some(docpath.clone());
        self.push_metadata(citekey, &meta)?;
        debug!(citekey, %docpath, "attached document");
        Ok(docpath)
    }

    fn remove_doc(&mut self, docpath: &str) -> Result<Option<String>> {
        self.filebroker.remove_doc(docpath)?;

        // Owner scan: linear over all metadata, first match wins. Fine
        // at personal-library scale.
        let target = content::resolve_docpath(self.filebroker.docsdir(), docpath);
        for citekey in self.filebroker.citekeys()? {
            let mut meta = match self.pull_metadata(&citekey) {
                Ok(meta) => meta,
                // Only the owner's metadata gets mutated; a corrupt
                // record under some other citekey must not abort the
                // detach.
                Err(Error::MalformedRecord { .. }) => {
                    warn!(%citekey, "skipping malformed metadata in owner scan");
                    continue;
                }
                Err(err) => return Err(err),
            };
            let owns = meta
                .docpath
                .as_deref()
                .is_some_and(|dp| content::resolve_docpath(self.filebroker.docsdir(), dp) == target);
            if owns {
                meta.docpath = None;
                self.push_metadata(&citekey, &meta)?;
                debug!(%citekey, docpath, "detached document");
                return Ok(Some(citekey));
            }
        }
        Ok(None)
    }
}
