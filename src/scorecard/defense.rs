use std::str::FromStr;

use anyhow::Result;
use itertools::Itertools;
use serde::Serialize;

use crate::scorecard::error::TranslationError;
use crate::scorecard::traits::FieldingPosition;
use crate::util::trim_chars;

/// Clauses that never credit a fielder at this granularity.
const NO_FIELDING_PHRASES: [&str; 4] = [
    "caught stealing",
    "on fan interference",
    "picks off",
    "wild pitch by",
];

/// Base names show up where a tag-out location is given instead of a fielder.
const BASE_NAMES: [&str; 3] = ["1st", "2nd", "3rd"];

const DEPTH_QUALIFIERS: [&str; 2] = ["deep", "shallow"];

/// Ordered putout/assist chain, e.g. shortstop to second to first.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct DefensiveChain(pub Vec<FieldingPosition>);

impl DefensiveChain {
    pub fn from_clause(clause: &str) -> Result<Self> {
        chain_references(clause)
            .into_iter()
            .filter_map(|reference| resolve_reference(reference, clause).transpose())
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hyphenated position codes, e.g. "6-4-3".
    pub fn render(&self) -> String {
        self.0.iter().map(|p| p.code()).join("-")
    }
}

/// The raw fielder references of a clause, in putout/assist order.
fn chain_references(clause: &str) -> Vec<&str> {
    let mut references = if NO_FIELDING_PHRASES.iter().any(|p| clause.contains(p)) {
        vec![]
    } else if clause.contains("catcher interference by") {
        vec!["catcher"]
    } else if let Some((_, fielder)) = clause.split_once(" fielded by ") {
        vec![fielder]
    } else if clause.contains(", ") && clause.contains(" to ") {
        clause
            .split(", ")
            .nth(1)
            .map(|s| s.split(" to ").collect())
            .unwrap_or_default()
    } else if clause.contains(" to ") {
        clause.split(" to ").skip(1).collect()
    } else {
        vec![]
    };

    if let Some((_, fielder)) = clause.split_once(" error by ") {
        references = vec![fielder];
    }
    references
}

/// Reduces "deep left fielder Mookie Betts" to "left" and maps it to a
/// position. Base names resolve to nothing.
fn resolve_reference(reference: &str, clause: &str) -> Result<Option<FieldingPosition>> {
    let unqualified = DEPTH_QUALIFIERS
        .iter()
        .fold(reference.to_string(), |r, q| r.replace(q, ""));
    let word = unqualified
        .split_whitespace()
        .next()
        .and_then(|w| w.split('-').next())
        .map(|w| trim_chars(w, " .,"))
        .unwrap_or_default();

    if let Ok(position) = FieldingPosition::from_str(word) {
        Ok(Some(position))
    } else if BASE_NAMES.contains(&word) {
        Ok(None)
    } else {
        Err(TranslationError::unknown_position(word, clause).into())
    }
}

/// Position named right after " error by ", e.g. `ThirdBaseman` for
/// "fielding error by third baseman Rafael Devers".
pub fn error_position(description: &str) -> Result<Option<FieldingPosition>> {
    let Some((_, fielder)) = description.split_once(" error by ") else {
        return Ok(None);
    };
    let word = fielder.split_whitespace().next().unwrap_or_default();
    FieldingPosition::from_str(word)
        .map(Some)
        .map_err(|_| TranslationError::unknown_position(word, description).into())
}
