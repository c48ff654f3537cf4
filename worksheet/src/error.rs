use std::fmt;

use llmd::parser::ParseError;

/// Errors surfaced by worksheet expansion.
#[derive(Debug)]
pub enum ExpandError {
    /// One or more template header lines failed the grammar.
    Format(Vec<ParseError>),
    /// The explicitly requested worksheet section does not exist.
    /// The worksheet-parsing direction never raises this: a missing
    /// section there yields an empty result instead.
    SectionNotFound(String),
}

impl ExpandError {
    /// Parse errors for diagnostic rendering, empty unless this is a
    /// format failure.
    pub fn parse_errors(&self) -> &[ParseError] {
        match self {
            ExpandError::Format(errors) => errors,
            ExpandError::SectionNotFound(_) => &[],
        }
    }
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandError::Format(errors) => match errors.first() {
                Some(first) => write!(f, "{}", first.message),
                None => write!(f, "invalid template"),
            },
            ExpandError::SectionNotFound(name) => {
                write!(f, "section '{}' not found in template", name)
            }
        }
    }
}

impl std::error::Error for ExpandError {}

impl From<Vec<ParseError>> for ExpandError {
    fn from(errors: Vec<ParseError>) -> Self {
        ExpandError::Format(errors)
    }
}
