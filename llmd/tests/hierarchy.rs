use llmd::header::{Cardinality, HeaderRecord};
use llmd::hierarchy;

fn record(level: usize, name: &str) -> HeaderRecord {
    HeaderRecord {
        level,
        name: name.to_string(),
        cardinality: Cardinality::Fixed(1),
        required: false,
        notes: String::new(),
        children: Vec::new(),
        span: 0..0,
    }
}

fn names(records: &[HeaderRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn nests_deeper_levels_under_shallower() {
    let roots = hierarchy::build(vec![record(1, "A"), record(2, "B"), record(3, "C")]);
    assert_eq!(names(&roots), ["A"]);
    assert_eq!(names(&roots[0].children), ["B"]);
    assert_eq!(names(&roots[0].children[0].children), ["C"]);
}

#[test]
fn equal_level_becomes_sibling() {
    let roots = hierarchy::build(vec![record(1, "A"), record(2, "B"), record(2, "C")]);
    assert_eq!(names(&roots), ["A"]);
    assert_eq!(names(&roots[0].children), ["B", "C"]);
}

#[test]
fn shallower_level_closes_open_ancestors() {
    let roots = hierarchy::build(vec![
        record(1, "A"),
        record(2, "B"),
        record(3, "C"),
        record(1, "D"),
        record(2, "E"),
    ]);
    assert_eq!(names(&roots), ["A", "D"]);
    assert_eq!(names(&roots[0].children), ["B"]);
    assert_eq!(names(&roots[0].children[0].children), ["C"]);
    assert_eq!(names(&roots[1].children), ["E"]);
}

#[test]
fn level_gaps_nest_by_relative_order() {
    // No level-2 header exists; level 3 still nests under level 1.
    let roots = hierarchy::build(vec![record(1, "A"), record(3, "X")]);
    assert_eq!(names(&roots), ["A"]);
    assert_eq!(names(&roots[0].children), ["X"]);
}

#[test]
fn deep_header_without_ancestor_is_a_root() {
    let roots = hierarchy::build(vec![record(3, "X"), record(3, "Y")]);
    assert_eq!(names(&roots), ["X", "Y"]);
}

#[test]
fn source_order_is_preserved() {
    let roots = hierarchy::build(vec![
        record(2, "Character"),
        record(3, "Name"),
        record(3, "Age"),
        record(3, "Goal"),
    ]);
    assert_eq!(names(&roots), ["Character"]);
    assert_eq!(names(&roots[0].children), ["Name", "Age", "Goal"]);
}

#[test]
fn empty_input_gives_empty_forest() {
    assert!(hierarchy::build(Vec::new()).is_empty());
}
