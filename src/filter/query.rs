//! Include/exclude query parsing and line matching.
//!
//! Filter syntax is a space-separated list of terms. A term prefixed with `!` excludes
//! lines containing it; any other term must be present. Matching is case-insensitive
//! plain substring containment: no regex, no word boundaries.

/// Characters required after `!` for an exclusion term to count.
///
/// Shorter exclusions (`!x`) are discarded outright rather than kept as one-character
/// exclusions or treated as inclusions.
pub const MIN_EXCLUDE_CHARS: usize = 2;

/// Parsed filter: lowercase terms a line must / must not contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Every one of these must appear in a line (in typed order)
    pub positive: Vec<String>,
    /// None of these may appear in a line (in typed order)
    pub negative: Vec<String>,
}

impl Query {
    /// Parse raw filter text. Never fails; empty input yields the empty query.
    pub fn parse(raw: &str) -> Self {
        let mut query = Query::default();

        for term in raw.trim().split(' ') {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }

            match term.strip_prefix('!') {
                Some(rest) => {
                    if rest.chars().count() >= MIN_EXCLUDE_CHARS {
                        query.negative.push(rest.to_lowercase());
                    }
                }
                None => query.positive.push(term.to_lowercase()),
            }
        }

        query
    }

    /// True when the query places no constraint on lines.
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Evaluate the query against one line.
    ///
    /// Any negative term rejects the line; otherwise every positive term must be
    /// contained in it.
    pub fn matches(&self, line: &str) -> bool {
        if self.is_empty() {
            return true;
        }

        let lower = line.to_lowercase();
        if self.negative.iter().any(|term| lower.contains(term.as_str())) {
            return false;
        }
        self.positive.iter().all(|term| lower.contains(term.as_str()))
    }

    /// Render the terms back into filter syntax.
    pub fn to_filter_text(&self) -> String {
        self.positive
            .iter()
            .cloned()
            .chain(self.negative.iter().map(|term| format!("!{term}")))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Free-function form of [`Query::matches`].
pub fn matches(line: &str, query: &Query) -> bool {
    query.matches(line)
}
