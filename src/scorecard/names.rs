use lazy_static::lazy_static;
use regex::Regex;

use crate::util::rewrite_until_stable;

lazy_static! {
    static ref DOUBLE_INITIAL_REGEX: Regex = Regex::new(r"[A-Z]\.\s+[A-Z]\.\s+").unwrap();
    static ref SINGLE_INITIAL_REGEX: Regex = Regex::new(r"[A-Z]\.\s+[A-Z]").unwrap();
    static ref PERIOD_BREAK_REGEX: Regex = Regex::new(r"\.\s+").unwrap();
    static ref JR_BEFORE_CAPITAL_REGEX: Regex = Regex::new(r" Jr\.\s+[A-Z]").unwrap();
    static ref SR_BEFORE_CAPITAL_REGEX: Regex = Regex::new(r" Sr\.\s+[A-Z]").unwrap();
    static ref GENERATIONAL_REGEX: Regex = Regex::new(r" (?:III|II|IV)\b").unwrap();
}

/// Collapses abbreviated initials so that "J. D. Martinez" reads "JD Martinez"
/// and "A. Jones" reads "A Jones".
pub fn fix_initials(input: &str) -> String {
    let collapsed = rewrite_until_stable(input, &DOUBLE_INITIAL_REGEX, |initials| {
        format!("{} ", PERIOD_BREAK_REGEX.replace_all(initials, ""))
    });
    rewrite_until_stable(&collapsed, &SINGLE_INITIAL_REGEX, |initial| {
        initial.replace('.', "")
    })
    .trim()
    .to_string()
}

/// A "Jr." or "Sr." followed by a capitalized word also closes a sentence, so
/// only the suffix itself is dropped there. Anywhere else the whole suffix goes.
fn strip_this_suffix(input: &str, before_capital: &Regex, suffix: &str) -> String {
    let sentence_kept = rewrite_until_stable(input, before_capital, |m| m.replacen(suffix, ".", 1));
    sentence_kept.replace(suffix, "").trim().to_string()
}

/// Removes generational and honorific suffixes from names inside `input`.
pub fn strip_suffixes(input: &str) -> String {
    let stripped = strip_this_suffix(input, &JR_BEFORE_CAPITAL_REGEX, " Jr.");
    let stripped = strip_this_suffix(&stripped, &SR_BEFORE_CAPITAL_REGEX, " Sr.");
    GENERATIONAL_REGEX
        .replace_all(&stripped, "")
        .replace(" St. ", " St ")
}

/// Normalizes a raw description before translation: initials are collapsed
/// and every sentence break is rewritten as a single ". ".
pub fn normalize_description(description: &str) -> String {
    PERIOD_BREAK_REGEX
        .replace_all(&fix_initials(description), ". ")
        .trim()
        .to_string()
}
