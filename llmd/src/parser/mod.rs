pub mod error;
pub mod grammar;
mod structural;

pub use error::ParseError;

use crate::Template;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Parse the source text into a complete Template.
    pub fn parse(&self) -> Result<Template, Vec<ParseError>> {
        let items = structural::parse_items(&self.source, self.file_id)?;
        Ok(Template {
            items,
            source_id: self.file_id,
        })
    }
}
