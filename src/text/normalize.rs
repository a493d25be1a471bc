//! Lexical normalization of OCR tokens for the coordinate index.
//!
//! Search engines such as Solr tokenize on punctuation (`WordDelimiterFilter`),
//! so a highlighted hit for `Lincoln` must find the box recorded for the token
//! `"Lincoln's,"`. The coordinate index is therefore keyed by a normalized form
//! of each token:
//!
//! 1. strip every leading character that is not an ASCII letter or digit
//! 2. strip every trailing character that is not an ASCII letter or digit
//! 3. strip a trailing possessive `'s`
//!
//! Steps 2 and 3 repeat until neither changes the word, which makes
//! normalization idempotent (`"ab.'s"` becomes `"ab"`, not `"ab."`).
//!
//! Case is never folded: the OCR engine's casing is the index key.
//! Reconstructed page text never goes through this module.

/// Possessive suffix removed from the end of index keys.
const POSSESSIVE_SUFFIX: &str = "'s";

#[inline]
fn is_lexeme_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Normalize a raw OCR token into its coordinate-index key.
///
/// Returns a sub-slice of `raw`; an empty result means the token has no
/// indexable content.
///
/// # Examples
///
/// ```
/// use alto_oxide::text::normalize_word;
///
/// assert_eq!(normalize_word("Lincoln's"), "Lincoln");
/// assert_eq!(normalize_word("O'Brien,"), "O'Brien");
/// assert_eq!(normalize_word("'tis"), "tis");
/// assert_eq!(normalize_word("dogs'"), "dogs");
/// assert_eq!(normalize_word("--"), "");
/// ```
pub fn normalize_word(raw: &str) -> &str {
    let mut word = raw.trim_start_matches(|c: char| !is_lexeme_char(c));
    loop {
        let trimmed = word.trim_end_matches(|c: char| !is_lexeme_char(c));
        let trimmed = trimmed.strip_suffix(POSSESSIVE_SUFFIX).unwrap_or(trimmed);
        if trimmed.len() == word.len() {
            return trimmed;
        }
        word = trimmed;
    }
}

/// True when every character of `word` is an ASCII letter or digit.
///
/// Such words are their own normalized form.
pub fn is_plain_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_lexeme_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words_unchanged() {
        for word in ["The", "Speech", "1865", "abc123", "X"] {
            assert!(is_plain_word(word));
            assert_eq!(normalize_word(word), word);
        }
    }

    #[test]
    fn test_strips_surrounding_punctuation() {
        assert_eq!(normalize_word("Speech."), "Speech");
        assert_eq!(normalize_word("\"Hello,\""), "Hello");
        assert_eq!(normalize_word("(1865)"), "1865");
        assert_eq!(normalize_word("--word--"), "word");
    }

    #[test]
    fn test_inner_punctuation_kept() {
        assert_eq!(normalize_word("O'Brien,"), "O'Brien");
        assert_eq!(normalize_word("well-known"), "well-known");
        assert_eq!(normalize_word("U.S.A."), "U.S.A");
    }

    #[test]
    fn test_possessive_stripped() {
        assert_eq!(normalize_word("Lincoln's"), "Lincoln");
        assert_eq!(normalize_word("Lincoln's."), "Lincoln");
        assert_eq!(normalize_word("ab.'s"), "ab");
    }

    #[test]
    fn test_possessive_is_case_sensitive() {
        assert_eq!(normalize_word("LINCOLN'S"), "LINCOLN'S");
    }

    #[test]
    fn test_trailing_apostrophe_is_punctuation() {
        assert_eq!(normalize_word("dogs'"), "dogs");
    }

    #[test]
    fn test_leading_apostrophe() {
        assert_eq!(normalize_word("'tis"), "tis");
        assert_eq!(normalize_word("'s"), "s");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(normalize_word("NEWS!"), "NEWS");
        assert_eq!(normalize_word("mIxEd"), "mIxEd");
    }

    #[test]
    fn test_no_lexeme_content() {
        assert_eq!(normalize_word(""), "");
        assert_eq!(normalize_word("..."), "");
        assert_eq!(normalize_word("—"), "");
        assert!(!is_plain_word(""));
    }

    #[test]
    fn test_non_ascii_letters_are_punctuation() {
        assert_eq!(normalize_word("café"), "caf");
        assert_eq!(normalize_word("élan"), "lan");
        assert!(!is_plain_word("café"));
    }

    #[test]
    fn test_idempotent_on_samples() {
        for raw in ["Lincoln's.", "ab's's", "''s", "x'", "O'Brien,", "'tis", "a.'s.'s"] {
            let once = normalize_word(raw);
            assert_eq!(normalize_word(once), once, "not idempotent for {raw:?}");
        }
    }
}
