//! Primitive file operations and docpath scheme resolution
//!
//! A docpath is either `docsdir://<name>`, naming a file inside the
//! library's managed document directory, or a plain filesystem path to
//! an external document. Everything above this module passes docpaths
//! around as strings and resolves them here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Scheme prefix marking a path inside the managed document directory.
pub const DOCSDIR_SCHEME: &str = "docsdir://";

/// Resolve a docpath against the managed document directory.
pub fn resolve_docpath(docsdir: &Path, docpath: &str) -> PathBuf {
    match docpath.strip_prefix(DOCSDIR_SCHEME) {
        Some(rel) => docsdir.join(rel),
        None => PathBuf::from(docpath),
    }
}

/// Render an absolute path in scheme form when it lies inside the
/// managed document directory, or verbatim otherwise.
pub fn to_docpath(docsdir: &Path, path: &Path) -> String {
    match path.strip_prefix(docsdir) {
        Ok(rel) => format!("{DOCSDIR_SCHEME}{}", rel.display()),
        Err(_) => path.display().to_string(),
    }
}

pub fn exists(path: &Path) -> bool {
    path.is_file()
}

pub fn read(path: &Path) -> io::Result<Vec<u8>> {
    debug!(path = %path.display(), "read");
    fs::read(path)
}

pub fn write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    debug!(path = %path.display(), len = bytes.len(), "write");
    fs::write(path, bytes)
}

pub fn copy(src: &Path, dst: &Path) -> io::Result<()> {
    debug!(src = %src.display(), dst = %dst.display(), "copy");
    fs::copy(src, dst).map(|_| ())
}

/// Remove a file. Already-absent files are not an error: the goal (no
/// file at `path`) is already satisfied.
pub fn remove(path: &Path) -> io::Result<()> {
    debug!(path = %path.display(), "remove");
    match fs::remove_file(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_scheme_path() {
        let docsdir = Path::new("/lib/doc");
        assert_eq!(
            resolve_docpath(docsdir, "docsdir://Page99.pdf"),
            PathBuf::from("/lib/doc/Page99.pdf")
        );
        assert_eq!(
            resolve_docpath(docsdir, "/home/me/paper.pdf"),
            PathBuf::from("/home/me/paper.pdf")
        );
    }

    #[test]
    fn test_to_docpath_round_trip() {
        let docsdir = Path::new("/lib/doc");
        let inside = docsdir.join("Page99.pdf");
        assert_eq!(to_docpath(docsdir, &inside), "docsdir://Page99.pdf");
        assert_eq!(
            resolve_docpath(docsdir, &to_docpath(docsdir, &inside)),
            inside
        );

        let outside = Path::new("/home/me/paper.pdf");
        assert_eq!(to_docpath(docsdir, outside), "/home/me/paper.pdf");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        write(&path, b"%PDF").unwrap();
        assert!(exists(&path));

        remove(&path).unwrap();
        assert!(!exists(&path));
        remove(&path).unwrap();
    }
}
