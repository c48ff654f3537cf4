//! Grouping flat header lists into trees by relative level ordering.

use crate::header::HeaderRecord;

/// Build a forest from a flat, level-tagged header sequence.
///
/// Maintains a stack of open ancestors: each incoming record first closes
/// every stack entry at its own level or deeper, then attaches to the
/// remaining stack top, or becomes a new root when the stack is empty.
///
/// Nesting is decided purely by relative level ordering, not contiguous
/// depth, so level gaps are tolerated: a level-3 header directly after a
/// level-1 header becomes its child even though no level-2 header exists,
/// and a level-3 header with no open ancestor at all becomes a root.
pub fn build(records: impl IntoIterator<Item = HeaderRecord>) -> Vec<HeaderRecord> {
    let mut roots: Vec<HeaderRecord> = Vec::new();
    let mut stack: Vec<HeaderRecord> = Vec::new();

    for record in records {
        close_to_level(record.level, &mut stack, &mut roots);
        stack.push(record);
    }

    // Close all remaining open records.
    while let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }

    roots
}

/// Pop stack entries that are no longer eligible parents for a record at
/// `level`, attaching each to its own parent (or to the roots).
fn close_to_level(level: usize, stack: &mut Vec<HeaderRecord>, roots: &mut Vec<HeaderRecord>) {
    while let Some(top) = stack.last() {
        if top.level < level {
            break;
        }
        let node = stack.pop().unwrap();
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}
