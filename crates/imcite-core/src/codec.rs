//! Encode/decode between raw artifact bytes and typed records
//!
//! Metadata is human-editable YAML; bibliographic data is BibTeX keyed
//! by citekey (via `imcite-bibtex`). Decode failures surface as
//! [`Error::MalformedRecord`], never as [`Error::NotFound`]: present
//! but unreadable bytes mean corruption or a bad manual edit.

use imcite_domain::{BibRecord, Metadata};

use crate::error::{Artifact, Error, Result};

/// The concrete codec for both artifact formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec;

impl Codec {
    pub fn decode_metadata(&self, citekey: &str, bytes: &[u8]) -> Result<Metadata> {
        serde_yaml::from_slice(bytes).map_err(|err| Error::MalformedRecord {
            citekey: citekey.to_string(),
            artifact: Artifact::Metadata,
            message: err.to_string(),
        })
    }

    pub fn encode_metadata(&self, citekey: &str, meta: &Metadata) -> Result<Vec<u8>> {
        let text = serde_yaml::to_string(meta).map_err(|err| Error::MalformedRecord {
            citekey: citekey.to_string(),
            artifact: Artifact::Metadata,
            message: err.to_string(),
        })?;
        Ok(text.into_bytes())
    }

    pub fn decode_bibdata(&self, citekey: &str, bytes: &[u8]) -> Result<BibRecord> {
        let text = std::str::from_utf8(bytes).map_err(|err| Error::MalformedRecord {
            citekey: citekey.to_string(),
            artifact: Artifact::Bibdata,
            message: err.to_string(),
        })?;
        imcite_bibtex::parse(text).map_err(|err| Error::MalformedRecord {
            citekey: citekey.to_string(),
            artifact: Artifact::Bibdata,
            message: err.to_string(),
        })
    }

    pub fn encode_bibdata(&self, record: &BibRecord) -> Vec<u8> {
        imcite_bibtex::format_record(record).into_bytes()
    }
}
