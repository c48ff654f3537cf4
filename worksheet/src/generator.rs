//! Worksheet generation: the hierarchy walk that expands each header node
//! into 1..N sibling instances per its cardinality and any quantity
//! override, emitting markdown header lines.

use std::collections::BTreeMap;

use llmd::header::{Cardinality, HeaderRecord, TemplateItem};
use llmd::hierarchy;

/// Caller-supplied instance counts keyed by dotted header path: ancestor
/// names joined by `.`, excluding the enclosing worksheet section's name
/// (e.g. `"Outline.Chapter.Key Scenes"`). Overrides apply to `Range` and
/// `Unlimited` cardinalities only; `Fixed` counts are never overridden.
pub type Quantities = BTreeMap<String, usize>;

/// Instance count for `[*]` headers with no quantity override.
const UNLIMITED_DEFAULT: usize = 2;

/// Decides the display name of one instance of a repeated container
/// header. `instance` is 0-based; returning `None` keeps the plain name.
pub type NumberingPolicy = fn(&HeaderRecord, usize) -> Option<String>;

/// Default numbering policy: a repeated level-2 container whose lowercase
/// name contains `"chapter"` gets a 1-based instance number
/// (`## Chapter 1`, `## Chapter 2`, ...). A deliberately narrow naming
/// heuristic kept for output compatibility; swap in another policy via
/// [`Generator::with_numbering`] to change it without touching the walk.
pub fn chapter_numbering(record: &HeaderRecord, instance: usize) -> Option<String> {
    if record.level == 2 && record.name.to_lowercase().contains("chapter") {
        Some(format!("{} {}", record.name, instance + 1))
    } else {
        None
    }
}

/// Walks built hierarchies and emits worksheet markdown lines.
pub struct Generator<'a> {
    quantities: &'a Quantities,
    numbering: NumberingPolicy,
    lines: Vec<String>,
}

impl<'a> Generator<'a> {
    pub fn new(quantities: &'a Quantities) -> Self {
        Generator {
            quantities,
            numbering: chapter_numbering,
            lines: Vec::new(),
        }
    }

    /// Replace the instance numbering policy.
    pub fn with_numbering(mut self, numbering: NumberingPolicy) -> Self {
        self.numbering = numbering;
        self
    }

    /// Generate a full worksheet from top-level template items.
    ///
    /// Each worksheet section renders as a `# name` heading plus a `---`
    /// rule (with a blank separator line when output already exists),
    /// followed by its built hierarchy. Consecutive bare headers between
    /// sections form one hierarchy run of their own.
    pub fn generate(mut self, items: &[TemplateItem]) -> String {
        let mut run: Vec<HeaderRecord> = Vec::new();

        for item in items {
            match item {
                TemplateItem::Section(section) => {
                    self.flush_run(&mut run);
                    if !self.lines.is_empty() {
                        self.lines.push(String::new());
                    }
                    self.lines.push(format!("# {}", section.name));
                    self.lines.push("---".to_string());
                    for root in hierarchy::build(section.content.clone()) {
                        self.emit(&root, &mut Vec::new());
                    }
                }
                TemplateItem::Header(record) => run.push(record.clone()),
            }
        }
        self.flush_run(&mut run);

        self.lines.join("\n")
    }

    /// Generate one worksheet section's content, without the `# name` /
    /// `---` wrapper.
    pub fn generate_section(mut self, content: &[HeaderRecord]) -> String {
        for root in hierarchy::build(content.to_vec()) {
            self.emit(&root, &mut Vec::new());
        }
        self.lines.join("\n")
    }

    fn flush_run(&mut self, run: &mut Vec<HeaderRecord>) {
        if run.is_empty() {
            return;
        }
        for root in hierarchy::build(std::mem::take(run)) {
            self.emit(&root, &mut Vec::new());
        }
    }

    /// Emit one node and its children, repeated per its effective count.
    fn emit(&mut self, record: &HeaderRecord, path: &mut Vec<String>) {
        path.push(record.name.clone());
        let count = self.effective_count(record, path);

        if count == 1 {
            if record.children.is_empty() {
                self.push_field_line(record.level, &record.name);
                if record.level == 1 {
                    self.lines.push(String::new());
                }
            } else {
                self.push_header_line(record.level, &record.name);
                if record.level == 1 {
                    self.lines.push(String::new());
                }
                for child in &record.children {
                    self.emit(child, path);
                }
            }
        } else {
            for instance in 0..count {
                if record.children.is_empty() {
                    self.push_field_line(record.level, &record.name);
                } else {
                    let shown = (self.numbering)(record, instance)
                        .unwrap_or_else(|| record.name.clone());
                    self.push_header_line(record.level, &shown);
                    for child in &record.children {
                        self.emit(child, path);
                    }
                }
            }
            // One blank line after the entire repeated block, not per
            // instance. Repeated leaf fields get none.
            if record.level == 1 && !record.children.is_empty() && count > 0 {
                self.lines.push(String::new());
            }
        }

        path.pop();
    }

    /// Resolve the instance count for a node at the given dotted path.
    fn effective_count(&self, record: &HeaderRecord, path: &[String]) -> usize {
        let key = path.join(".");
        match record.cardinality {
            Cardinality::Fixed(count) => count,
            Cardinality::Range { min, .. } => self.quantities.get(&key).copied().unwrap_or(min),
            Cardinality::Unlimited => self
                .quantities
                .get(&key)
                .copied()
                .unwrap_or(UNLIMITED_DEFAULT),
        }
    }

    /// Leaf field line: trailing pipe with no value is the blank-field marker.
    fn push_field_line(&mut self, level: usize, name: &str) {
        self.lines.push(format!("{} {} | ", "#".repeat(level), name));
    }

    fn push_header_line(&mut self, level: usize, name: &str) {
        self.lines.push(format!("{} {}", "#".repeat(level), name));
    }
}
