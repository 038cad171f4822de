use serde::Serialize;

use crate::scorecard::names::{fix_initials, strip_suffixes};

/// A description split into the batter's own event and whatever follows it.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct Segments {
    /// Whole description after suffix stripping, used for runner-out searches.
    pub stripped: String,
    /// First sentence: the batter's own event.
    pub primary: String,
    /// The part of `primary` that describes the fielding play.
    pub fielding: String,
    /// Remaining sentences describing later baserunner events.
    pub suffix: String,
}

impl Segments {
    pub fn new(description: &str) -> Self {
        let stripped = fix_initials(&strip_suffixes(description));
        let (primary, suffix) = stripped.split_once(". ").unwrap_or((&stripped, ""));
        Self {
            fielding: fielding_clause(primary).to_string(),
            primary: primary.to_string(),
            suffix: suffix.to_string(),
            stripped: stripped.clone(),
        }
    }
}

/// Drops deflection and assist detail and any "Label: " prefix.
fn fielding_clause(primary: &str) -> &str {
    let clause = primary.split(", deflected").next().unwrap_or(primary);
    let clause = clause.split(", assist").next().unwrap_or(clause);
    if clause.contains(": ") {
        clause.split(": ").nth(1).unwrap_or(clause)
    } else {
        clause
    }
}
