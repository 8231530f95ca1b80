//! Literal find/replace correction for OCR and scraping artifacts.

/// An ordered set of literal substitution rules.
///
/// Rules are applied in insertion order, and a later rule may re-touch
/// text produced by an earlier rule on the same line. That ordering is
/// part of the contract: callers that need rules to be independent must
/// make sure no rule's output contains another rule's input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplacementTable {
    rules: Vec<(String, String)>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override a rule. An existing key keeps its position in
    /// the order; a new key is appended.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        match self.rules.iter_mut().find(|(f, _)| *f == from) {
            Some(rule) => rule.1 = to,
            None => self.rules.push((from, to)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(f, t)| (f.as_str(), t.as_str()))
    }
}

impl FromIterator<(String, String)> for ReplacementTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (from, to) in iter {
            table.insert(from, to);
        }
        table
    }
}

/// Apply every rule, in order, to one line. All non-overlapping
/// occurrences of each rule's pattern are replaced.
pub fn correct_line(line: &str, table: &ReplacementTable) -> String {
    let mut out = line.to_string();
    for (from, to) in table.iter() {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

/// Apply the table to every line. An empty table returns the input
/// unchanged without re-allocating.
pub fn correct_lines(lines: Vec<String>, table: &ReplacementTable) -> Vec<String> {
    if table.is_empty() {
        return lines;
    }
    lines
        .into_iter()
        .map(|line| correct_line(&line, table))
        .collect()
}
