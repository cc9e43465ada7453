// crates/iso3166-updates-core/src/text.rs

//! Text normalization and similarity scoring shared by the name matcher and
//! the search matcher.

use std::borrow::Cow;

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Côte d'Ivoire` -> `Cote d'Ivoire`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use iso3166_updates_core::text::fold_key;
///
/// assert_eq!(fold_key("Åland Islands"), "aland islands");
/// assert_eq!(fold_key("Türkiye"), "turkiye");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Folded key with punctuation replaced by single spaces.
///
/// `"Korea, Republic of"` and `"korea republic  of"` produce the same key.
pub fn match_key(s: &str) -> String {
    let folded = fold_key(s);
    let mut out = String::with_capacity(folded.len());
    for word in folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Decode a raw query parameter.
///
/// Percent-escapes are decoded (`%3E2010` -> `>2010`, `South%20Korea` ->
/// `South Korea`), non-breaking and other Unicode spaces become ASCII spaces
/// and runs of whitespace are collapsed. Undecodable escapes are kept as-is.
pub fn decode_param(raw: &str) -> String {
    let decoded: Cow<'_, str> = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-case the first letter of every word and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = ch.is_whitespace() || ch == '-' || ch == '(';
        }
    }
    out
}

/// Edit-distance similarity of two strings on a 0–100 scale.
///
/// Both sides are reduced with [`match_key`] first. The score is floored so
/// only identical keys reach 100.
pub fn similarity(a: &str, b: &str) -> u8 {
    ratio(&match_key(a), &match_key(b))
}

/// Similarity between two already-normalized keys.
pub(crate) fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    (strsim::normalized_levenshtein(a, b) * 100.0).floor() as u8
}

/// Best similarity of `term` against any run of words in `text` of the same
/// word count as `term`.
///
/// A `term` that appears verbatim (after [`match_key`]) inside `text` scores
/// 100. Empty terms score 0.
///
/// ```rust
/// use iso3166_updates_core::text::partial_similarity;
///
/// assert_eq!(partial_similarity("subdivision", "Addition of subdivision CZ-10"), 100);
/// assert!(partial_similarity("subdivisoin", "Addition of subdivision CZ-10") >= 80);
/// ```
pub fn partial_similarity(term: &str, text: &str) -> u8 {
    let term = match_key(term);
    if term.is_empty() {
        return 0;
    }
    let text = match_key(text);
    if text.contains(&term) {
        return 100;
    }

    let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
    let width = term.split(' ').count();
    if words.len() <= width {
        return ratio(&term, &text);
    }

    words
        .windows(width)
        .map(|window| ratio(&term, &window.join(" ")))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_key_strips_punctuation_and_accents() {
        assert_eq!(match_key("Korea, Republic of"), "korea republic of");
        assert_eq!(match_key("  Côte d'Ivoire "), "cote d ivoire");
    }

    #[test]
    fn decode_param_handles_escapes_and_spaces() {
        assert_eq!(decode_param("%3E2010"), ">2010");
        assert_eq!(decode_param("%3C%3E2010,2012"), "<>2010,2012");
        assert_eq!(decode_param("South%20Korea"), "South Korea");
        assert_eq!(decode_param("South\u{a0}Korea"), "South Korea");
        assert_eq!(decode_param("100%"), "100%");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("south KOREA"), "South Korea");
        assert_eq!(title_case("guinea-bissau"), "Guinea-Bissau");
    }

    #[test]
    fn similarity_scale() {
        assert_eq!(similarity("France", "france"), 100);
        assert_eq!(similarity("Republic of Korea", "republic of korea"), 100);
        let close = similarity("Frence", "France");
        assert!((80..100).contains(&close), "got {close}");
        assert!(similarity("Japan", "Uruguay") < 40);
    }

    #[test]
    fn partial_similarity_finds_best_window() {
        let text = "Change of short name from Swaziland to Eswatini";
        assert_eq!(partial_similarity("swaziland", text), 100);
        assert_eq!(partial_similarity("short name", text), 100);
        assert!(partial_similarity("swazilnd", text) >= 85);
        assert!(partial_similarity("border", text) < 100);
        assert_eq!(partial_similarity("", text), 0);
    }
}
