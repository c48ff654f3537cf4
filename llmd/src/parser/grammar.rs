//! The header-line grammar: name, cardinality bracket, required marker, notes.
//!
//! A header line is a run of `#` characters (its level) followed by a body
//! matching `<name> [cardinality] $ | notes`, where every group after the
//! name is optional but the order is fixed:
//!
//! ```text
//! ### Primary Goal [1] $ | What the character wants most in the story
//! ## Chapter [*] | Detailed chapter information
//! ### Key Scenes [2-4]
//! ```

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::header::{Cardinality, HeaderRecord};
use crate::parser::error::ParseError;

/// Header body: name, optional `[...]` bracket, optional `$`, optional `| notes`.
/// The name may not contain `|`, `[`, or `$`.
static HEADER_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^|\[$]+?)(?:\s*(\[[^\]]*\]))?(?:\s*(\$))?(?:\s*\|\s*(.*))?$")
        .expect("header body pattern")
});

/// Parse one trimmed header line (leading `#` run plus body) into a record.
///
/// The caller guarantees the line starts with at least one `#`.
pub fn parse_header_line(
    line: &str,
    span: Range<usize>,
    file_id: usize,
) -> Result<HeaderRecord, ParseError> {
    let level = line.chars().take_while(|&c| c == '#').count();
    let body = line[level..].trim();

    let caps = HEADER_BODY.captures(body).ok_or_else(|| {
        ParseError::error(
            format!("invalid header format: {}", line),
            span.clone(),
            file_id,
        )
    })?;

    let name = caps.get(1).map_or("", |m| m.as_str()).trim();
    if name.is_empty() {
        return Err(ParseError::error(
            format!("invalid header format: {}", line),
            span,
            file_id,
        )
        .with_note("header name must not be empty"));
    }

    let cardinality = match caps.get(2) {
        Some(bracket) => parse_cardinality(bracket.as_str(), line, &span, file_id)?,
        None => Cardinality::Fixed(1),
    };

    Ok(HeaderRecord {
        level,
        name: name.to_string(),
        cardinality,
        required: caps.get(3).is_some(),
        notes: caps
            .get(4)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        children: Vec::new(),
        span,
    })
}

/// Parse a cardinality bracket: `*` | digits | `digits-digits`.
///
/// `min <= max` is deliberately not checked for ranges.
fn parse_cardinality(
    bracket: &str,
    line: &str,
    span: &Range<usize>,
    file_id: usize,
) -> Result<Cardinality, ParseError> {
    let body = bracket.trim_start_matches('[').trim_end_matches(']');

    if body == "*" {
        return Ok(Cardinality::Unlimited);
    }
    if let Some(count) = parse_count(body) {
        return Ok(Cardinality::Fixed(count));
    }
    if let Some((min, max)) = body.split_once('-') {
        if let (Some(min), Some(max)) = (parse_count(min), parse_count(max)) {
            return Ok(Cardinality::Range { min, max });
        }
    }

    Err(ParseError::error(
        format!("invalid cardinality format: {}", line),
        span.clone(),
        file_id,
    )
    .with_note("cardinality must be `*`, a count, or `min-max`"))
}

fn parse_count(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
