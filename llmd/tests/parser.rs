use llmd::Template;
use llmd::header::{Cardinality, HeaderRecord, TemplateItem};
use llmd::parser::{ParseError, Parser};

fn parse(source: &str) -> Template {
    Parser::new(source.to_string(), 0)
        .parse()
        .expect("parse failed")
}

fn parse_err(source: &str) -> Vec<ParseError> {
    Parser::new(source.to_string(), 0)
        .parse()
        .expect_err("expected parse failure")
}

fn only_header(template: &Template) -> &HeaderRecord {
    match template.items.as_slice() {
        [TemplateItem::Header(record)] => record,
        other => panic!("expected a single header, got {:?}", other),
    }
}

#[test]
fn level_counts_leading_markers() {
    assert_eq!(only_header(&parse("# Title")).level, 1);
    assert_eq!(only_header(&parse("### Title")).level, 3);
    assert_eq!(only_header(&parse("##### Title")).level, 5);
}

#[test]
fn name_is_trimmed() {
    let template = parse("##   Zodiac Sign   ");
    assert_eq!(only_header(&template).name, "Zodiac Sign");
}

#[test]
fn marker_without_space_is_a_header() {
    let header = &parse("#Title");
    let record = only_header(header);
    assert_eq!(record.level, 1);
    assert_eq!(record.name, "Title");
}

#[test]
fn cardinality_defaults_to_fixed_one() {
    let template = parse("### Title");
    let record = only_header(&template);
    assert_eq!(record.cardinality, Cardinality::Fixed(1));
    assert!(!record.required);
    assert_eq!(record.notes, "");
}

#[test]
fn cardinality_forms() {
    assert_eq!(
        only_header(&parse("## Character [*]")).cardinality,
        Cardinality::Unlimited
    );
    assert_eq!(
        only_header(&parse("### Act [3]")).cardinality,
        Cardinality::Fixed(3)
    );
    assert_eq!(
        only_header(&parse("### Key Scenes [2-4]")).cardinality,
        Cardinality::Range { min: 2, max: 4 }
    );
}

#[test]
fn range_order_is_not_enforced() {
    assert_eq!(
        only_header(&parse("### Field [5-2]")).cardinality,
        Cardinality::Range { min: 5, max: 2 }
    );
}

#[test]
fn required_marker() {
    assert!(only_header(&parse("### Title $")).required);
    assert!(only_header(&parse("### Title [1] $")).required);
    assert!(!only_header(&parse("### Title [1]")).required);
}

#[test]
fn notes_after_pipe() {
    let template = parse("### Premise [1] $ | Write a compelling premise");
    let record = only_header(&template);
    assert_eq!(record.name, "Premise");
    assert_eq!(record.cardinality, Cardinality::Fixed(1));
    assert!(record.required);
    assert_eq!(record.notes, "Write a compelling premise");
}

#[test]
fn notes_without_other_markup() {
    let record_template = parse("# Genre | Primary genre classification");
    let record = only_header(&record_template);
    assert_eq!(record.name, "Genre");
    assert_eq!(record.notes, "Primary genre classification");
}

#[test]
fn malformed_cardinality_is_rejected() {
    for source in ["### Field [abc]", "### Field [2-]", "### Field [-3]", "### Field [1-2-3]", "### Field []"] {
        let errors = parse_err(source);
        assert_eq!(errors.len(), 1, "source: {}", source);
        assert!(
            errors[0].message.contains(source),
            "error should carry the raw line, got: {}",
            errors[0].message
        );
    }
}

#[test]
fn text_after_required_marker_is_rejected() {
    let errors = parse_err("### Na$me");
    assert!(errors[0].message.contains("invalid header format"));
}

#[test]
fn empty_template_is_valid() {
    assert!(parse("").items.is_empty());
    assert!(parse("   \n\n  \n").items.is_empty());
}

#[test]
fn free_text_lines_are_ignored() {
    let template = parse("some prose\n### Title\nmore prose\n");
    assert_eq!(template.items.len(), 1);
    assert_eq!(only_header(&template).name, "Title");
}

#[test]
fn section_marker_groups_following_headers() {
    let template = parse("- Characters\n## Character [*]\n### Name [1] $\n");
    let [TemplateItem::Section(section)] = template.items.as_slice() else {
        panic!("expected a single section");
    };
    assert_eq!(section.name, "Characters");
    assert_eq!(section.content.len(), 2);
    assert_eq!(section.content[0].name, "Character");
    assert_eq!(section.content[1].name, "Name");
}

#[test]
fn headers_before_any_section_are_top_level() {
    let template = parse("### Title\n- Style\n### Voice\n");
    assert_eq!(template.items.len(), 2);
    assert!(matches!(&template.items[0], TemplateItem::Header(h) if h.name == "Title"));
    assert!(matches!(&template.items[1], TemplateItem::Section(s) if s.name == "Style"));
}

#[test]
fn section_lookup_by_exact_name() {
    let template = parse("- Characters\n## Character [*]\n- Plot\n# Story Arc\n");
    assert!(template.section("Characters").is_some());
    assert!(template.section("Plot").is_some());
    assert!(template.section("characters").is_none());
    assert!(template.section("Missing").is_none());
}

#[test]
fn errors_are_collected_across_sections() {
    let errors = parse_err("- Good\n# Fine\n### Bad [abc]\n- Worse\n## Broken [2-]\n");
    assert_eq!(errors.len(), 2);
}

#[test]
fn error_span_points_at_offending_line() {
    let source = "# Good\n  ### Bad [abc]\n";
    let errors = parse_err(source);
    assert_eq!(&source[errors[0].span.clone()], "### Bad [abc]");
}
