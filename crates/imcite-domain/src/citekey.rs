//! Citekey validation

use thiserror::Error;

/// A citekey that cannot be used as a storage key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CitekeyError {
    #[error("citekey is empty")]
    Empty,
    #[error("citekey {0:?} contains a path separator")]
    PathSeparator(String),
    #[error("citekey {0:?} is a reserved path component")]
    Reserved(String),
}

/// Check that a citekey is a usable, path-safe storage key.
///
/// Citekeys are otherwise opaque; they only need to be safe to embed
/// as a single file-name component under the library root.
pub fn validate_citekey(citekey: &str) -> Result<(), CitekeyError> {
    if citekey.is_empty() {
        return Err(CitekeyError::Empty);
    }
    if citekey.contains(['/', '\\']) || citekey.contains('\0') {
        return Err(CitekeyError::PathSeparator(citekey.to_string()));
    }
    if citekey == "." || citekey == ".." {
        return Err(CitekeyError::Reserved(citekey.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_typical_citekeys() {
        for key in ["Page99", "10.1371_journal.pone.0038236", "doe2024-draft"] {
            assert!(validate_citekey(key).is_ok(), "rejected {key:?}");
        }
    }

    #[test]
    fn test_rejects_unsafe_citekeys() {
        assert_eq!(validate_citekey(""), Err(CitekeyError::Empty));
        assert!(matches!(
            validate_citekey("a/b"),
            Err(CitekeyError::PathSeparator(_))
        ));
        assert!(matches!(
            validate_citekey(".."),
            Err(CitekeyError::Reserved(_))
        ));
    }
}
