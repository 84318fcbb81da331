//! String comparison helpers.
//!
//! Package names are sorted the way a browser's `localeCompare` orders them under
//! the root collation: whitespace first, then punctuation and symbols, then digits,
//! then letters. Letters compare case-insensitively first, and Latin-1 accented
//! letters compare as their base letter. Ties are broken by accents (unaccented
//! first), then by case (lowercase first). Letters outside Latin-1 compare by
//! code point.

use std::cmp::Ordering;

/// Root collation order of ASCII punctuation and symbols.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

fn primary_weight(c: char) -> (CharClass, u32) {
    if c.is_whitespace() {
        return (CharClass::Whitespace, c as u32);
    }
    if let Some(pos) = PUNCTUATION_ORDER.find(c) {
        return (CharClass::Punctuation, pos as u32);
    }
    if c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_control()) {
        return (
            CharClass::Punctuation,
            PUNCTUATION_ORDER.len() as u32 + c as u32,
        );
    }
    if let Some(digit) = c.to_digit(10) {
        return (CharClass::Digit, digit);
    }
    (CharClass::Letter, base_letter(fold_case(c)) as u32)
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Base letter of a lowercase Latin-1 accented letter.
fn base_letter(c: char) -> char {
    match c {
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

fn is_accented(c: char) -> bool {
    let folded = fold_case(c);
    base_letter(folded) != folded
}

/// Compares two strings using a locale-aware ordering.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use pkgbrowse_utils::string::locale_cmp;
///
/// assert_eq!(locale_cmp("Zlib", "apk-tools"), Ordering::Greater);
/// assert_eq!(locale_cmp("py-six", "py3-six"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = a
        .chars()
        .map(is_accented)
        .cmp(b.chars().map(is_accented));
    if secondary != Ordering::Equal {
        return secondary;
    }

    let tertiary = a
        .chars()
        .map(char::is_uppercase)
        .cmp(b.chars().map(char::is_uppercase));
    if tertiary != Ordering::Equal {
        return tertiary;
    }

    a.cmp(b)
}

/// Case-insensitive substring match. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| locale_cmp(a, b));
        names
    }

    #[test]
    fn test_locale_cmp_ignores_case_at_primary_level() {
        assert_eq!(
            sorted(vec!["busybox", "Alpine", "apk-tools", "Zlib", "curl"]),
            vec!["Alpine", "apk-tools", "busybox", "curl", "Zlib"]
        );
    }

    #[test]
    fn test_locale_cmp_lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Abc", "abc"), Ordering::Greater);
        assert_eq!(locale_cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_punctuation_before_digits_before_letters() {
        assert_eq!(
            sorted(vec!["pyx", "py3-six", "py-six", "py_six"]),
            vec!["py_six", "py-six", "py3-six", "pyx"]
        );
    }

    #[test]
    fn test_locale_cmp_prefix_sorts_first() {
        assert_eq!(locale_cmp("gcc", "gcc-doc"), Ordering::Less);
        assert_eq!(locale_cmp("gcc-doc", "gcc"), Ordering::Greater);
    }

    #[test]
    fn test_locale_cmp_folds_accents() {
        assert_eq!(
            sorted(vec!["zlib", "éclair", "fish", "Émacs"]),
            vec!["éclair", "Émacs", "fish", "zlib"]
        );
        assert_eq!(locale_cmp("cafe", "café"), Ordering::Less);
        assert_eq!(locale_cmp("café", "cafes"), Ordering::Less);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("OpenSSL toolkit", "openssl"));
        assert!(contains_ignore_case("musl", "USL"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("zlib", "bzip"));
    }
}
