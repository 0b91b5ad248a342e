//! Header and label text normalization
//!
//! Template headers drift between revisions: non-breaking spaces, `Inbound - AMZN`
//! vs `Inbound/AMZN`, mixed case, accented department names. Everything is
//! compared in the normalized form produced here.

/// Accent and encoding variants folded to their canonical spelling
pub const DEFAULT_FOLDS: &[(&str, &str)] = &[("CRÉTS", "CRETS"), ("CRÃ‰TS", "CRETS")];

/// Normalize with the built-in folds
pub fn normalize(text: &str) -> String {
    normalize_with(text, DEFAULT_FOLDS.iter().copied())
}

/// Normalize text for comparison:
/// NBSP → space, runs of `-`/`/` → space, whitespace collapsed and trimmed,
/// uppercased, then each `(from, to)` fold applied in order.
pub fn normalize_with<'a, I>(text: &str, folds: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let spaced: String = text
        .chars()
        .map(|c| match c {
            '\u{a0}' | '-' | '/' => ' ',
            other => other,
        })
        .collect();

    let mut out = spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    for (from, to) in folds {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

/// Whitespace-separated tokens of the normalized text
pub fn tokens<'a, I>(text: &str, folds: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    normalize_with(text, folds)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
