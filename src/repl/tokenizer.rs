//! Shell-style tokenization of input lines

/// Split a line into words, honoring single and double quotes.
///
/// Quoted text becomes one word with the quotes removed and escapes
/// resolved (`info --name "John Doe"` gives `info`, `--name`, `John Doe`).
/// When the quoting is malformed, for instance an unclosed quote while the
/// user is still typing, the line is split on whitespace instead. The
/// function never fails.
pub fn tokenize(line: &str) -> Vec<String> {
    shlex::split(line).unwrap_or_else(|| split_fields(line))
}

/// Plain whitespace split, quotes kept as typed
fn split_fields(line: &str) -> Vec<String> {
    line.split_whitespace().map(ToString::to_string).collect()
}
