//! Canonical block names.
//!
//! A block name is written `@else if`, `@else   if`, `@else\tif` or even
//! with `else` and `if` on separate lines.
//! Definition lookups only ever see the canonical form: no `@`, no outer
//! whitespace, inner whitespace runs collapsed to a single space. Case is
//! preserved, so `@If` is a different (unknown) block than `@if`.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Normalize raw block-name text to its canonical form.
pub fn canonical_block_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let name = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    WHITESPACE_RUN.replace_all(name, " ").into_owned()
}

/// Returns true if `name` is already canonical.
pub fn is_canonical_block_name(name: &str) -> bool {
    !name.is_empty() && canonical_block_name(name) == name
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("@if", "if")]
    #[case("@else if", "else if")]
    #[case("@else   if", "else if")]
    #[case("@else \t if", "else if")]
    #[case("@else\r\n    if", "else if")]
    #[case("  @empty ", "empty")]
    #[case("else if", "else if")]
    #[case("@If", "If")]
    fn canonicalizes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(canonical_block_name(raw), expected);
    }

    #[rstest]
    #[case("if", true)]
    #[case("else if", true)]
    #[case("else  if", false)]
    #[case("@if", false)]
    #[case(" if", false)]
    #[case("", false)]
    fn detects_canonical_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_canonical_block_name(name), expected);
    }
}
