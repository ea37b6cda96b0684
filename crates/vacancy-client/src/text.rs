use vacancy_core::models::ExtractionLimits;

/// Normalize extracted element text.
///
/// Collapses all whitespace runs (including non-breaking spaces) to single
/// spaces, strips zero-width characters, and decodes `&nbsp;` remnants that
/// survive entity decoding in malformed markup.
pub fn clean_text(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The validity predicate: does cleaned text read as a plausible job description?
///
/// Length in `[min, max)` characters, strictly more than the token minimum,
/// and at least one sentence-terminating punctuation mark.
pub fn is_valid_description(cleaned: &str, limits: &ExtractionLimits) -> bool {
    let len = cleaned.chars().count();
    len >= limits.min_description_len
        && len < limits.max_description_len
        && cleaned.split(' ').count() > limits.min_token_count
        && cleaned.chars().any(|c| matches!(c, '.' | '!' | '?'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ExtractionLimits {
        ExtractionLimits::default()
    }

    /// Builds a string of exactly `len` characters with >15 tokens and a period.
    fn sample_of_len(len: usize) -> String {
        // 16 one-char tokens plus a period: 32 chars before padding.
        let mut s = "a b c d e f g h i j k l m n o p.".to_string();
        assert!(s.chars().count() <= len);
        while s.chars().count() < len {
            s.push('x');
        }
        s
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean_text("  a \n\t b   c  "), "a b c");
    }

    #[test]
    fn test_clean_strips_zero_width_chars() {
        assert_eq!(clean_text("a\u{200B}b\u{200C}c\u{200D}d\u{FEFF}e"), "abcde");
    }

    #[test]
    fn test_clean_decodes_nbsp() {
        assert_eq!(clean_text("a&nbsp;b"), "a b");
        // Already-decoded non-breaking spaces collapse like any whitespace.
        assert_eq!(clean_text("a\u{A0}b"), "a b");
    }

    #[test]
    fn test_length_boundary() {
        assert!(!is_valid_description(&sample_of_len(79), &limits()));
        assert!(is_valid_description(&sample_of_len(80), &limits()));
    }

    #[test]
    fn test_upper_length_boundary_is_exclusive() {
        assert!(is_valid_description(&sample_of_len(49_999), &limits()));
        assert!(!is_valid_description(&sample_of_len(50_000), &limits()));
    }

    #[test]
    fn test_requires_sentence_punctuation() {
        let no_punct = "one two three four five six seven eight nine ten eleven twelve \
                        thirteen fourteen fifteen sixteen seventeen eighteen";
        assert!(no_punct.chars().count() >= 80);
        assert!(!is_valid_description(no_punct, &limits()));
        assert!(is_valid_description(&format!("{no_punct}!"), &limits()));
    }

    #[test]
    fn test_requires_token_count() {
        // Long enough and punctuated, but only three tokens.
        let few_tokens = format!("{}a {}b {}c.", "x".repeat(30), "y".repeat(30), "z".repeat(30));
        assert!(!is_valid_description(&few_tokens, &limits()));
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(!is_valid_description("", &limits()));
    }
}
