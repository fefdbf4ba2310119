//! BibTeX formatting
//!
//! Turns [`BibRecord`]s back into the stable on-disk text form the
//! parser reads. Values are brace-delimited except purely numeric
//! ones, so LaTeX commands and case protection survive a round trip.
//!
//! [`BibRecord`]: imcite_domain::BibRecord

use imcite_domain::{BibEntry, BibRecord};

/// Format a whole record, one entry per `@` block.
pub fn format_record(record: &BibRecord) -> String {
    record
        .iter()
        .map(|(citekey, entry)| format_entry(citekey, entry))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a single entry under the given citekey.
pub fn format_entry(citekey: &str, entry: &BibEntry) -> String {
    let mut out = String::new();
    out.push('@');
    out.push_str(entry.kind.as_str());
    out.push('{');
    out.push_str(citekey);
    out.push_str(",\n");

    for (key, value) in entry.all_fields() {
        out.push_str("    ");
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(&format_value(&value));
        out.push_str(",\n");
    }

    out.push('}');
    out
}

fn format_value(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return value.to_string();
    }
    format!("{{{value}}}")
}
