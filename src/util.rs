use regex::{Match, Regex};

/// Repeatedly rewrites the first match of `re` until no match remains.
/// A rewrite can expose a new match immediately to its right, so the whole
/// string is rescanned each time. Every rewrite must shrink the input,
/// which bounds the loop by the input length.
pub(crate) fn rewrite_until_stable<F>(input: &str, re: &Regex, mut rewrite: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut output = input.to_string();
    for _ in 0..=input.len() {
        let Some(m) = re.find(&output) else { break };
        output = splice(&output, m, &rewrite(m.as_str()));
    }
    output
}

fn splice(haystack: &str, m: Match, replacement: &str) -> String {
    let mut spliced = String::with_capacity(haystack.len());
    spliced.push_str(&haystack[..m.start()]);
    spliced.push_str(replacement);
    spliced.push_str(&haystack[m.end()..]);
    spliced
}

/// Trims any of `chars` from both ends, like Python's `str.strip(chars)`.
pub(crate) fn trim_chars<'a>(s: &'a str, chars: &str) -> &'a str {
    s.trim_matches(|c| chars.contains(c))
}
