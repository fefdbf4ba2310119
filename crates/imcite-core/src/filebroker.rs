//! Raw per-citekey file storage
//!
//! Maps a citekey to its three on-disk locations under the library
//! root and moves encoded bytes in and out of them. Encoding is not
//! this module's business; see [`crate::codec`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use imcite_domain::validate_citekey;

use crate::content;
use crate::error::{Artifact, Error, Result};

const META_DIR: &str = "meta";
const BIB_DIR: &str = "bib";
const DOC_DIR: &str = "doc";
const META_EXT: &str = "yaml";
const BIB_EXT: &str = "bib";

/// Byte-level storage under one library root.
///
/// Layout: `meta/<citekey>.yaml`, `bib/<citekey>.bib`, and
/// `doc/<citekey>.<original extension>`. The directory names are fixed
/// so a library created once can always be reopened.
#[derive(Debug)]
pub struct FileBroker {
    root: PathBuf,
    metadir: PathBuf,
    bibdir: PathBuf,
    docdir: PathBuf,
}

impl FileBroker {
    /// Open a library rooted at `root`.
    ///
    /// With `create`, missing directories are built; without it, a
    /// root that does not carry the expected layout is
    /// [`Error::RepositoryNotFound`].
    pub fn initialize(root: impl Into<PathBuf>, create: bool) -> Result<Self> {
        let root = root.into();
        let broker = Self {
            metadir: root.join(META_DIR),
            bibdir: root.join(BIB_DIR),
            docdir: root.join(DOC_DIR),
            root,
        };

        if create {
            fs::create_dir_all(&broker.metadir)?;
            fs::create_dir_all(&broker.bibdir)?;
            fs::create_dir_all(&broker.docdir)?;
            info!(root = %broker.root.display(), "created library");
        } else if !(broker.metadir.is_dir() && broker.bibdir.is_dir() && broker.docdir.is_dir()) {
            return Err(Error::RepositoryNotFound(broker.root));
        }

        debug!(root = %broker.root.display(), "opened library");
        Ok(broker)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The managed document directory, for docpath resolution.
    pub fn docsdir(&self) -> &Path {
        &self.docdir
    }

    fn meta_path(&self, citekey: &str) -> PathBuf {
        self.metadir.join(format!("{citekey}.{META_EXT}"))
    }

    fn bib_path(&self, citekey: &str) -> PathBuf {
        self.bibdir.join(format!("{citekey}.{BIB_EXT}"))
    }

    pub fn push_metadata_raw(&mut self, citekey: &str, bytes: &[u8]) -> Result<()> {
        validate_citekey(citekey)?;
        content::write(&self.meta_path(citekey), bytes)?;
        Ok(())
    }

    pub fn push_bibdata_raw(&mut self, citekey: &str, bytes: &[u8]) -> Result<()> {
        validate_citekey(citekey)?;
        content::write(&self.bib_path(citekey), bytes)?;
        Ok(())
    }

    pub fn pull_metadata_raw(&self, citekey: &str) -> Result<Vec<u8>> {
        self.pull_raw(citekey, self.meta_path(citekey), Artifact::Metadata)
    }

    pub fn pull_bibdata_raw(&self, citekey: &str) -> Result<Vec<u8>> {
        self.pull_raw(citekey, self.bib_path(citekey), Artifact::Bibdata)
    }

    fn pull_raw(&self, citekey: &str, path: PathBuf, artifact: Artifact) -> Result<Vec<u8>> {
        validate_citekey(citekey)?;
        if !content::exists(&path) {
            return Err(Error::NotFound {
                citekey: citekey.to_string(),
                artifact,
            });
        }
        Ok(content::read(&path)?)
    }

    pub fn exists_meta(&self, citekey: &str) -> bool {
        validate_citekey(citekey).is_ok() && content::exists(&self.meta_path(citekey))
    }

    pub fn exists_bib(&self, citekey: &str) -> bool {
        validate_citekey(citekey).is_ok() && content::exists(&self.bib_path(citekey))
    }

    /// Citekeys that have a metadata file, sorted. The sort keeps
    /// scans (notably the docpath owner scan) deterministic.
    pub fn citekeys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for dirent in fs::read_dir(&self.metadir)? {
            let path = dirent?.path();
            if path.extension().is_some_and(|ext| ext == META_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Copy a document into the managed directory under the citekey's
    /// name, keeping the source's extension. `source` may be a scheme
    /// path or an external one. Returns the new docpath in scheme form.
    pub fn copy_doc_in(&mut self, citekey: &str, source: &str) -> Result<String> {
        validate_citekey(citekey)?;
        let src = content::resolve_docpath(&self.docdir, source);
        let name = match src.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => format!("{citekey}.{ext}"),
            None => citekey.to_string(),
        };
        let dst = self.docdir.join(&name);
        content::copy(&src, &dst)?;
        Ok(content::to_docpath(&self.docdir, &dst))
    }

    /// Delete the document at `docpath` if it lies inside the managed
    /// directory. Idempotent: an already-missing file is fine. Paths
    /// outside the managed directory are left untouched.
    pub fn remove_doc(&mut self, docpath: &str) -> Result<()> {
        let path = content::resolve_docpath(&self.docdir, docpath);
        if path.starts_with(&self.docdir) {
            content::remove(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_initialize_create_builds_layout() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("lib");
        let broker = FileBroker::initialize(&root, true).unwrap();
        assert!(root.join("meta").is_dir());
        assert!(root.join("bib").is_dir());
        assert!(root.join("doc").is_dir());

        // Reopening without create finds the same layout.
        drop(broker);
        FileBroker::initialize(&root, false).unwrap();
    }

    #[test]
    fn test_initialize_missing_root_fails() {
        let dir = tempdir().unwrap();
        let err = FileBroker::initialize(dir.path().join("absent"), false).unwrap_err();
        assert!(matches!(err, Error::RepositoryNotFound(_)));

        // A bare directory without the layout is just as invalid.
        let bare = dir.path().join("bare");
        fs::create_dir(&bare).unwrap();
        let err = FileBroker::initialize(&bare, false).unwrap_err();
        assert!(matches!(err, Error::RepositoryNotFound(_)));
    }

    #[test]
    fn test_raw_push_pull_round_trip() {
        let dir = tempdir().unwrap();
        let mut broker = FileBroker::initialize(dir.path(), true).unwrap();

        assert!(!broker.exists_meta("Page99"));
        broker.push_metadata_raw("Page99", b"tags: []\n").unwrap();
        assert!(broker.exists_meta("Page99"));
        assert!(!broker.exists_bib("Page99"));
        assert_eq!(broker.pull_metadata_raw("Page99").unwrap(), b"tags: []\n");

        let err = broker.pull_bibdata_raw("Page99").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_push_rejects_unsafe_citekey() {
        let dir = tempdir().unwrap();
        let mut broker = FileBroker::initialize(dir.path(), true).unwrap();
        let err = broker.push_metadata_raw("../escape", b"x").unwrap_err();
        assert!(matches!(err, Error::Citekey(_)));
    }

    #[test]
    fn test_pull_rejects_unsafe_citekey() {
        let dir = tempdir().unwrap();
        let broker = FileBroker::initialize(dir.path().join("lib"), true).unwrap();

        // A sibling file a traversal key would otherwise resolve to.
        fs::write(dir.path().join("escape.yaml"), b"tags: []\n").unwrap();

        let err = broker.pull_metadata_raw("../../escape").unwrap_err();
        assert!(matches!(err, Error::Citekey(_)));
        let err = broker.pull_bibdata_raw("../../escape").unwrap_err();
        assert!(matches!(err, Error::Citekey(_)));
        assert!(!broker.exists_meta("../../escape"));
        assert!(!broker.exists_bib("../../escape"));
    }

    #[test]
    fn test_citekeys_sorted() {
        let dir = tempdir().unwrap();
        let mut broker = FileBroker::initialize(dir.path(), true).unwrap();
        broker.push_metadata_raw("b", b"{}").unwrap();
        broker.push_metadata_raw("a", b"{}").unwrap();
        broker.push_metadata_raw("c", b"{}").unwrap();
        assert_eq!(broker.citekeys().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_copy_doc_in_keeps_extension() {
        let dir = tempdir().unwrap();
        let mut broker = FileBroker::initialize(dir.path().join("lib"), true).unwrap();

        let external = dir.path().join("paper.pdf");
        fs::write(&external, b"%PDF").unwrap();

        let docpath = broker
            .copy_doc_in("Page99", external.to_str().unwrap())
            .unwrap();
        assert_eq!(docpath, "docsdir://Page99.pdf");
        assert!(broker.docsdir().join("Page99.pdf").is_file());
        // Source is copied, not moved.
        assert!(external.is_file());
    }

    #[test]
    fn test_copy_doc_in_from_docsdir_scheme() {
        let dir = tempdir().unwrap();
        let mut broker = FileBroker::initialize(dir.path(), true).unwrap();
        fs::write(broker.docsdir().join("Page99.pdf"), b"%PDF").unwrap();

        let docpath = broker.copy_doc_in("Larry99", "docsdir://Page99.pdf").unwrap();
        assert_eq!(docpath, "docsdir://Larry99.pdf");
        assert!(broker.docsdir().join("Page99.pdf").is_file());
        assert!(broker.docsdir().join("Larry99.pdf").is_file());
    }

    #[test]
    fn test_remove_doc_idempotent_and_scoped() {
        let dir = tempdir().unwrap();
        let mut broker = FileBroker::initialize(dir.path().join("lib"), true).unwrap();
        fs::write(broker.docsdir().join("Page99.pdf"), b"%PDF").unwrap();

        broker.remove_doc("docsdir://Page99.pdf").unwrap();
        assert!(!broker.docsdir().join("Page99.pdf").exists());
        broker.remove_doc("docsdir://Page99.pdf").unwrap();

        // External files are never deleted.
        let external = dir.path().join("keep.pdf");
        fs::write(&external, b"%PDF").unwrap();
        broker.remove_doc(external.to_str().unwrap()).unwrap();
        assert!(external.is_file());
    }
}
