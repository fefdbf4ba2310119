//! BibTeX decoding and encoding for imcite bibliographic records
//!
//! Parses the per-paper `.bib` artifact into a [`BibRecord`] keyed by
//! citekey and formats records back to stable text. Handles braced and
//! quoted field values, nested braces, `#` concatenation, numeric
//! values, and `%` line comments. `@string`, `@preamble` and `@comment`
//! blocks are skipped rather than expanded: the per-paper files this
//! crate reads are written by the formatter below and never use them.
//!
//! [`BibRecord`]: imcite_domain::BibRecord

mod formatter;
mod parser;

pub use formatter::{format_entry, format_record};
pub use parser::{parse, ParseError};
