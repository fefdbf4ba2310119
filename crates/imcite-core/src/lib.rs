//! Citekey-addressed storage for the imcite paper library
//!
//! Every paper is one citekey with up to three artifacts under the
//! library root: a YAML metadata record, a BibTeX bibliographic
//! record, and an optional document file. The layers, bottom up:
//!
//! - [`content`] — file primitives and `docsdir://` scheme resolution;
//! - [`FileBroker`] — citekey to on-disk locations, raw bytes only;
//! - [`Codec`] — bytes to typed records and back;
//! - [`DataBroker`] — the record-level API ([`RecordStore`]);
//! - [`DataCache`] — same contract, write-through in-memory layer.
//!
//! Callers hold either store behind [`RecordStore`]. A store value is
//! one open library session; the model is single-threaded and every
//! operation blocks until its file I/O is done.

pub mod codec;
pub mod config;
pub mod content;
pub mod databroker;
pub mod datacache;
pub mod error;
pub mod filebroker;
pub mod store;

pub use codec::Codec;
pub use config::{Config, ConfigError};
pub use databroker::DataBroker;
pub use datacache::DataCache;
pub use error::{Artifact, Error, Result};
pub use filebroker::FileBroker;
pub use store::RecordStore;
