//! nom-based BibTeX parser

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::map,
    IResult,
};

use imcite_domain::{BibEntry, BibRecord, EntryKind};

/// Failure to decode a `.bib` artifact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no bibliography entries found")]
    NoEntries,
    #[error("malformed entry near line {line}: {message}")]
    Syntax { line: u32, message: String },
}

/// Parse BibTeX text into a record keyed by citekey.
///
/// Strict: any entry that fails to parse is an error, since the input
/// is a single paper's stored artifact and partial results would mask
/// on-disk corruption. Text outside `@` blocks is ignored.
pub fn parse(input: &str) -> Result<BibRecord, ParseError> {
    let mut record = BibRecord::default();
    let mut remaining = input;

    while !remaining.is_empty() {
        remaining = skip_to_entry(remaining);
        if remaining.is_empty() {
            break;
        }

        let line = line_of(input, remaining);
        match parse_at_block(remaining) {
            Ok((rest, Some((citekey, entry)))) => {
                record.insert(citekey, entry);
                remaining = rest;
            }
            Ok((rest, None)) => {
                remaining = rest;
            }
            Err(_) => {
                return Err(ParseError::Syntax {
                    line,
                    message: "unparseable @-block".to_string(),
                });
            }
        }
    }

    if record.is_empty() {
        return Err(ParseError::NoEntries);
    }
    Ok(record)
}

/// 1-based line number of `at` within `input`.
fn line_of(input: &str, at: &str) -> u32 {
    let consumed = input.len() - at.len();
    input[..consumed].matches('\n').count() as u32 + 1
}

/// Advance past whitespace, `%` line comments, and stray text until
/// the next `@` or end of input.
fn skip_to_entry(input: &str) -> &str {
    let bytes = input.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'@' => break,
            b'%' => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
            }
            _ => pos += 1,
        }
    }
    &input[pos..]
}

/// Parse one `@type{...}` block. Returns `None` for the non-entry
/// block types (`string`, `preamble`, `comment`), which are skipped.
fn parse_at_block(input: &str) -> IResult<&str, Option<(String, BibEntry)>> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, kind_token) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;

    match kind_token.to_lowercase().as_str() {
        "string" | "preamble" | "comment" => {
            let (rest, _) = multispace0(rest)?;
            let (rest, _) = braced_block(rest)?;
            Ok((rest, None))
        }
        _ => {
            let (rest, (citekey, entry)) = parse_entry_body(rest, kind_token)?;
            Ok((rest, Some((citekey, entry))))
        }
    }
}

/// Parse `{citekey, field = value, ...}` after the entry type.
fn parse_entry_body<'a>(input: &'a str, kind_token: &str) -> IResult<&'a str, (String, BibEntry)> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, citekey) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || "_-:./".contains(c))(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(',')(rest)?;

    let mut entry = BibEntry::new(EntryKind::parse(kind_token));
    let mut remaining = rest;
    loop {
        let (rest, _) = multispace0(remaining)?;
        if let Some(rest) = rest.strip_prefix('}') {
            return Ok((rest, (citekey.to_string(), entry)));
        }
        let (rest, (key, value)) = parse_field(rest)?;
        entry.set_field(&key, value);

        let (rest, _) = multispace0(rest)?;
        remaining = rest.strip_prefix(',').unwrap_or(rest);
    }
}

/// Parse one `key = value` pair.
fn parse_field(input: &str) -> IResult<&str, (String, String)> {
    let (rest, key) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, value) = parse_value(rest)?;
    Ok((rest, (key.to_string(), value)))
}

/// Parse a field value: braced, quoted, numeric, or bare token, with
/// `#` concatenation between parts. Bare tokens (unexpanded macros)
/// are kept verbatim.
fn parse_value(input: &str) -> IResult<&str, String> {
    let mut result = String::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        let (rest, part) = alt((
            braced_value,
            quoted_value,
            map(
                take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
                str::to_string,
            ),
        ))(rest)?;
        result.push_str(&part);

        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix('#') {
            Some(stripped) => remaining = stripped,
            None => return Ok((rest, result)),
        }
    }
}

/// Parse `{...}` honoring nested braces; returns the inner text.
fn braced_value(input: &str) -> IResult<&str, String> {
    let (rest, block) = braced_block(input)?;
    Ok((rest, block[1..block.len() - 1].to_string()))
}

/// Scan a brace-balanced block, escapes included. Returns the block
/// with its outer braces.
fn braced_block(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let bytes = input.as_bytes();
    let mut depth = 0i32;
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], &input[..pos + 1]));
                }
            }
            b'\\' => pos += 1,
            _ => {}
        }
        pos += 1;
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// Parse `"..."`, keeping inner braces and escape pairs verbatim.
fn quoted_value(input: &str) -> IResult<&str, String> {
    if !input.starts_with('"') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let bytes = input.as_bytes();
    let mut result = String::new();
    let mut depth = 0i32;
    let mut pos = 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'"' if depth == 0 => return Ok((&input[pos + 1..], result)),
            b'{' => {
                depth += 1;
                result.push('{');
            }
            b'}' => {
                depth -= 1;
                result.push('}');
            }
            b'\\' if pos + 1 < bytes.len() => {
                result.push('\\');
                pos += 1;
                // The escaped character may be multi-byte.
                let ch = input[pos..].chars().next().unwrap();
                result.push(ch);
                pos += ch.len_utf8() - 1;
            }
            _ => {
                // Re-take the full char for multi-byte input.
                let ch = input[pos..].chars().next().unwrap();
                result.push(ch);
                pos += ch.len_utf8() - 1;
            }
        }
        pos += 1;
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}
