//! URL slug derivation for bands created through show submissions.

use std::sync::LazyLock;

use regex::Regex;

/// Slug used when a name contains no slug-safe characters at all.
pub const FALLBACK_SLUG: &str = "band";

/// Upper bound on `-2`, `-3`, ... suffixes tried before giving up.
pub const MAX_SLUG_SUFFIX: u32 = 50;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").expect("valid regex"));

static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").expect("valid regex"));

/// Lowercase, turn spaces into hyphens, strip everything outside
/// `[a-z0-9-]`, collapse hyphen runs and trim hyphens from both ends.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase().replace(' ', "-");
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let collapsed = HYPHEN_RUNS.replace_all(&stripped, "-");
    let slug = collapsed.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// The `n`th candidate for `base`: `base` itself for 1, `base-n` after that.
pub fn suffixed(base: &str, n: u32) -> String {
    if n <= 1 {
        base.to_string()
    } else {
        format!("{base}-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_hyphens() {
        assert_eq!(slugify("The Midnight Owls"), "the-midnight-owls");
    }

    #[test]
    fn punctuation_is_stripped() {
        assert_eq!(slugify("AC/DC"), "acdc");
        assert_eq!(slugify("Guns N' Roses!"), "guns-n-roses");
    }

    #[test]
    fn hyphen_runs_collapse_and_ends_trim() {
        assert_eq!(slugify("  -- Sleep  Token --  "), "sleep-token");
        assert_eq!(slugify("Hot & Heavy"), "hot-heavy");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Björk"), "bjrk");
    }

    #[test]
    fn nothing_usable_falls_back() {
        assert_eq!(slugify("!!!"), FALLBACK_SLUG);
        assert_eq!(slugify("   "), FALLBACK_SLUG);
    }

    #[test]
    fn suffixes_start_at_two() {
        assert_eq!(suffixed("owls", 1), "owls");
        assert_eq!(suffixed("owls", 2), "owls-2");
        assert_eq!(suffixed("owls", 11), "owls-11");
    }
}
