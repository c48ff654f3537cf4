//! Round-trip parsing of generated or filled worksheets.
//!
//! The reader scans worksheet markdown line by line. A `# title` line
//! immediately followed by `---` opens a section. Inside a section, header
//! lines ending with `|` open fields, header lines without a trailing pipe
//! are structural and close any open field, and plain lines accumulate
//! into both the section content and the open field's value.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Field line: header markers, field name, pipe, inline remainder.
/// The name is the second capture; the remainder stays on the header line
/// and is not part of the field value (values accumulate from the lines
/// that follow).
static FIELD_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)\s*(.+?)\s*\|\s*(.*)$").expect("field line pattern"));

/// One parsed worksheet section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedSection {
    /// Section title from the `# title` boundary line.
    pub title: String,
    /// Full section text, including the boundary lines and all headers.
    pub content: String,
    /// Field name → accumulated value. When the same field name occurs
    /// more than once in a section (repeated container blocks), only the
    /// last occurrence is kept; repetition-aware disambiguation is the
    /// caller's responsibility.
    pub fields: BTreeMap<String, String>,
}

/// Parse worksheet markdown into a map of section title → parsed section.
pub fn parse_worksheet(text: &str) -> BTreeMap<String, ParsedSection> {
    let lines: Vec<&str> = text.trim().lines().map(str::trim).collect();
    let mut sections: BTreeMap<String, ParsedSection> = BTreeMap::new();
    let mut current: Option<OpenSection> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        // Section boundary: `# title` immediately followed by `---`.
        if let Some(title) = line.strip_prefix("# ") {
            if lines.get(i + 1).copied() == Some("---") {
                if let Some(open) = current.take() {
                    open.finish(&mut sections);
                }
                current = Some(OpenSection::new(title.trim(), line, lines[i + 1]));
                i += 2;
                continue;
            }
        }

        // Lines outside any section carry no meaning.
        if let Some(open) = current.as_mut() {
            open.take_line(line);
        }
        i += 1;
    }

    if let Some(open) = current.take() {
        open.finish(&mut sections);
    }
    sections
}

/// Parse a single section by title; an empty record when absent.
/// Unlike `expand`, a missing section is not an error in this direction.
pub fn parse_worksheet_section(text: &str, name: &str) -> ParsedSection {
    parse_worksheet(text).remove(name).unwrap_or_default()
}

/// Full content of one section, or an empty string when absent.
pub fn get_section_content(text: &str, name: &str) -> String {
    parse_worksheet_section(text, name).content
}

/// Field map of one section, or an empty map when absent.
pub fn get_section_fields(text: &str, name: &str) -> BTreeMap<String, String> {
    parse_worksheet_section(text, name).fields
}

/// Accumulation state for the section currently being scanned.
struct OpenSection {
    title: String,
    content: Vec<String>,
    fields: BTreeMap<String, String>,
    /// Open field: name and value lines collected so far.
    field: Option<(String, Vec<String>)>,
}

impl OpenSection {
    fn new(title: &str, heading: &str, rule: &str) -> Self {
        OpenSection {
            title: title.to_string(),
            content: vec![heading.to_string(), rule.to_string()],
            fields: BTreeMap::new(),
            field: None,
        }
    }

    fn take_line(&mut self, line: &str) {
        if line.starts_with('#') && line.ends_with('|') {
            // Field header: commit the previous field, open a new one.
            self.commit_field();
            if let Some(caps) = FIELD_LINE.captures(line) {
                let name = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
                self.field = Some((name, Vec::new()));
                self.content.push(line.to_string());
            }
        } else if line.starts_with('#') {
            // Structural header: closes any open field.
            self.commit_field();
            self.content.push(line.to_string());
        } else {
            self.content.push(line.to_string());
            if let Some((_, value)) = self.field.as_mut() {
                value.push(line.to_string());
            }
        }
    }

    /// Commit the open field's accumulated value. Later commits under the
    /// same name overwrite earlier ones.
    fn commit_field(&mut self) {
        if let Some((name, value)) = self.field.take() {
            self.fields.insert(name, value.join("\n").trim().to_string());
        }
    }

    fn finish(mut self, sections: &mut BTreeMap<String, ParsedSection>) {
        self.commit_field();
        sections.insert(
            self.title.clone(),
            ParsedSection {
                title: self.title,
                content: self.content.join("\n"),
                fields: self.fields,
            },
        );
    }
}
