pub mod header;
pub mod hierarchy;
pub mod parser;

use crate::header::{TemplateItem, WorksheetSection};

/// A parsed LLM-MD template.
#[derive(Debug, Clone)]
pub struct Template {
    /// Top-level items in source order: worksheet sections and bare headers.
    pub items: Vec<TemplateItem>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}

impl Template {
    /// Look up a worksheet section by exact name.
    pub fn section(&self, name: &str) -> Option<&WorksheetSection> {
        self.items.iter().find_map(|item| match item {
            TemplateItem::Section(section) if section.name == name => Some(section),
            _ => None,
        })
    }
}
