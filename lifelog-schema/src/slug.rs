//! Key name derivation for custom fields.

use std::collections::HashSet;

/// Shortest slug accepted before falling back to a random key
const MIN_SLUG_LEN: usize = 2;

/// Lowercase ASCII slug of `label`.
///
/// Runs of anything other than `[a-z0-9]` collapse to a single `_`; leading
/// and trailing `_` are trimmed.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_sep = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

/// Random key used when a label has too few ASCII characters to slug.
pub fn fallback_key() -> String {
    format!("field_{:08x}", rand::random::<u32>())
}

/// Derive a key name for `label` that is not in `taken`.
///
/// Collisions get `_1`, `_2`, ... appended until the key is free.
pub fn unique_key_name<'a, I>(label: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = taken.into_iter().collect();

    let mut base = slugify(label);
    if base.len() < MIN_SLUG_LEN {
        base = fallback_key();
    }

    if !taken.contains(base.as_str()) {
        return base;
    }

    (1..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("My Field!!"), "my_field");
        assert_eq!(slugify("  Sleep -- Hours "), "sleep_hours");
        assert_eq!(slugify("Wake-up time"), "wake_up_time");
        assert_eq!(slugify("already_snake"), "already_snake");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("기분"), "");
        assert_eq!(slugify("기분 score"), "score");
        assert_eq!(slugify("??"), "");
    }

    #[test]
    fn short_slug_falls_back_to_random_key() {
        let key = unique_key_name("??", std::iter::empty());
        assert!(key.starts_with("field_"));
        let hex = &key["field_".len()..];
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));

        assert!(unique_key_name("A", std::iter::empty()).starts_with("field_"));
    }

    #[test]
    fn collisions_get_numeric_suffix() {
        assert_eq!(unique_key_name("Mood", ["mood"]), "mood_1");
        assert_eq!(unique_key_name("Mood", ["mood", "mood_1"]), "mood_2");
        assert_eq!(unique_key_name("Mood", ["other"]), "mood");
    }
}
