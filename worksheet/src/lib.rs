pub mod error;
pub mod generator;
pub mod reader;

pub use error::ExpandError;
pub use generator::{Generator, NumberingPolicy, Quantities, chapter_numbering};
pub use reader::{
    ParsedSection, get_section_content, get_section_fields, parse_worksheet,
    parse_worksheet_section,
};

use llmd::parser::Parser;

/// Expand an LLM-MD template into a fillable worksheet.
///
/// The whole template is parsed eagerly, so a malformed header line
/// anywhere in it fails the call, even in a section the caller did not
/// request. With `section` given, only that worksheet section's content is
/// generated, without its `# name` / `---` wrapper; an unknown section
/// name is [`ExpandError::SectionNotFound`].
pub fn expand(
    template: &str,
    section: Option<&str>,
    quantities: &Quantities,
) -> Result<String, ExpandError> {
    let parsed = Parser::new(template.to_string(), 0).parse()?;

    let generator = Generator::new(quantities);
    match section {
        Some(name) => {
            let section = parsed
                .section(name)
                .ok_or_else(|| ExpandError::SectionNotFound(name.to_string()))?;
            Ok(generator.generate_section(&section.content))
        }
        None => Ok(generator.generate(&parsed.items)),
    }
}
