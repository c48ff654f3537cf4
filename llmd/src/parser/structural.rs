//! Line-oriented template structure parsing.
//!
//! Splits template text into trimmed lines and classifies each: a `- `
//! marker opens a worksheet section, a `#` run is a header line parsed by
//! the grammar, blank lines and free text carry no structural meaning.

use std::ops::Range;

use crate::header::{TemplateItem, WorksheetSection};
use crate::parser::error::ParseError;
use crate::parser::grammar;

/// Parse template source into an ordered list of top-level items.
pub fn parse_items(source: &str, file_id: usize) -> Result<Vec<TemplateItem>, Vec<ParseError>> {
    let mut state = ParseState::new(file_id);

    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();

        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let lead = raw.len() - raw.trim_start().len();
        let span = (start + lead)..(start + lead + line.len());
        state.process_line(line, span);
    }

    state.finalize()
}

struct ParseState {
    file_id: usize,
    items: Vec<TemplateItem>,
    /// Worksheet section currently collecting header lines, if any.
    current: Option<WorksheetSection>,
    errors: Vec<ParseError>,
}

impl ParseState {
    fn new(file_id: usize) -> Self {
        ParseState {
            file_id,
            items: Vec::new(),
            current: None,
            errors: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, span: Range<usize>) {
        if let Some(name) = line.strip_prefix("- ") {
            // Worksheet section marker: closes any open section.
            self.close_section();
            self.current = Some(WorksheetSection {
                name: name.trim().to_string(),
                content: Vec::new(),
                span,
            });
        } else if line.starts_with('#') {
            match grammar::parse_header_line(line, span, self.file_id) {
                Ok(record) => match self.current.as_mut() {
                    Some(section) => section.content.push(record),
                    None => self.items.push(TemplateItem::Header(record)),
                },
                Err(err) => self.errors.push(err),
            }
        }
        // Any other non-empty line is free text and is ignored.
    }

    fn close_section(&mut self) {
        if let Some(section) = self.current.take() {
            self.items.push(TemplateItem::Section(section));
        }
    }

    fn finalize(mut self) -> Result<Vec<TemplateItem>, Vec<ParseError>> {
        self.close_section();
        if self.errors.is_empty() {
            Ok(self.items)
        } else {
            Err(self.errors)
        }
    }
}
