use std::ops::Range;

/// Repetition policy declared in a header's bracket group:
/// `[3]`, `[2-4]`, `[*]`. A header without brackets is `Fixed(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly `n` instances. Quantity overrides never apply.
    Fixed(usize),
    /// Between `min` and `max` instances; generation defaults to `min`.
    /// The parser does not enforce `min <= max`.
    Range { min: usize, max: usize },
    /// Any number of instances; generation defaults to 2.
    Unlimited,
}

/// One parsed template header line.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRecord {
    /// Nesting depth: the number of leading `#` characters, always >= 1.
    pub level: usize,
    /// Trimmed label text, excluding cardinality/required/notes markup.
    pub name: String,
    pub cardinality: Cardinality,
    /// Whether the line carried the `$` required marker.
    pub required: bool,
    /// Free-text guidance after the first `|`. May be empty.
    pub notes: String,
    /// Populated by the hierarchy builder; empty after template parsing.
    pub children: Vec<HeaderRecord>,
    /// Byte span of the source line, for error reporting.
    pub span: Range<usize>,
}

/// A named grouping of headers introduced by a `- ` marker line.
/// Purely a grouping and filtering key, not a markdown element itself;
/// the generator renders it as a `# name` heading plus a `---` rule.
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetSection {
    pub name: String,
    /// Flat header list in source order; hierarchy is built at generation.
    pub content: Vec<HeaderRecord>,
    /// Byte span of the marker line.
    pub span: Range<usize>,
}

/// A top-level template item, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateItem {
    Section(WorksheetSection),
    Header(HeaderRecord),
}
