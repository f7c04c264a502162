//! Porter-style stemming transform.
//!
//! A self-contained, deterministic reduction of English words to a root
//! form: plural stripping, `-ed`/`-ing` removal, consonant-`y` to `i`, a
//! table of common derivational suffixes, and final `-e` removal. It is a
//! simplified Porter stemmer, not the full algorithm, but it is applied
//! identically on the indexing and the query side, which is the property
//! the rest of the pipeline depends on.

/// The stemming transform used by [`StandardAnalyzer`](crate::analysis::StandardAnalyzer).
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

/// Derivational suffix rewrites applied after inflection stripping.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("iveness", "ive"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("izer", "ize"),
    ("ator", "ate"),
    ("alism", "al"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

impl PorterStemmer {
    /// Create a new stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Stem a single lowercase word.
    ///
    /// Words shorter than three characters and words containing
    /// non-ASCII-alphabetic characters are returned unchanged; the suffix
    /// rules below only make sense for plain English words.
    pub fn stem(&self, word: &str) -> String {
        if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word.to_string();
        }

        let mut stemmed = word.to_string();

        // Step 1a: plurals.
        if stemmed.ends_with("sses") || stemmed.ends_with("ies") {
            stemmed.truncate(stemmed.len() - 2);
        } else if !stemmed.ends_with("ss") && stemmed.ends_with('s') {
            stemmed.pop();
        }

        // Step 1b: -ed / -ing.
        if stemmed.ends_with("eed") {
            if stemmed.len() > 4 {
                stemmed.pop();
            }
        } else if stemmed.ends_with("ed") && stemmed.len() > 4 {
            stemmed.truncate(stemmed.len() - 2);
            Self::repair_after_strip(&mut stemmed);
        } else if stemmed.ends_with("ing") && stemmed.len() > 5 {
            stemmed.truncate(stemmed.len() - 3);
            Self::repair_after_strip(&mut stemmed);
        }

        // Step 1c: consonant-y becomes i so "stories"/"story" agree.
        if stemmed.len() > 2 && stemmed.ends_with('y') {
            let prev = stemmed.as_bytes()[stemmed.len() - 2];
            if !matches!(prev, b'a' | b'e' | b'i' | b'o' | b'u') {
                stemmed.pop();
                stemmed.push('i');
            }
        }

        // Step 2: common derivational suffixes.
        for (suffix, replacement) in SUFFIX_RULES {
            if stemmed.ends_with(suffix) && stemmed.len() > suffix.len() + 1 {
                stemmed.truncate(stemmed.len() - suffix.len());
                stemmed.push_str(replacement);
                break;
            }
        }

        // Step 3: final -e, so "movie"/"movies" agree.
        if stemmed.len() > 4 && stemmed.ends_with('e') {
            stemmed.pop();
        }

        stemmed
    }

    /// After stripping -ed/-ing: restore a final 'e' for stems like
    /// "creat"/"combin", and undo doubled consonants ("runn" -> "run").
    fn repair_after_strip(stemmed: &mut String) {
        if stemmed.ends_with("at") || stemmed.ends_with("bl") || stemmed.ends_with("iz") {
            stemmed.push('e');
            return;
        }
        let bytes = stemmed.as_bytes();
        if bytes.len() > 1 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
            let last = bytes[bytes.len() - 1];
            if !matches!(last, b'l' | b's' | b'z') {
                stemmed.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_stripping() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("wars"), "war");
        assert_eq!(stemmer.stem("hours"), "hour");
        assert_eq!(stemmer.stem("classes"), "class");
        assert_eq!(stemmer.stem("class"), "class");
    }

    #[test]
    fn test_inflection_stripping() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("jumped"), "jump");
        assert_eq!(stemmer.stem("agreed"), stemmer.stem("agree"));
        assert_eq!(stemmer.stem("creating"), stemmer.stem("created"));
    }

    #[test]
    fn test_inflected_and_plural_forms_agree() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("stories"), stemmer.stem("story"));
        assert_eq!(stemmer.stem("movies"), stemmer.stem("movie"));
    }

    #[test]
    fn test_short_and_non_ascii_words_unchanged() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("a"), "a");
        assert_eq!(stemmer.stem("of"), "of");
        assert_eq!(stemmer.stem("2"), "2");
        assert_eq!(stemmer.stem("étoiles"), "étoiles");
    }

    #[test]
    fn test_stemming_is_idempotent_enough_for_matching() {
        // The pipeline never stems twice, but stems of stems must not panic
        // or produce wildly different forms.
        let stemmer = PorterStemmer::new();
        for word in ["wars", "running", "stories", "classes"] {
            let once = stemmer.stem(word);
            let _ = stemmer.stem(&once);
        }
    }
}
