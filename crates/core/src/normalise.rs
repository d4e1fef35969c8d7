//! Text normalisation shared by training and inference.
//!
//! Every piece of text that reaches the classifier goes through [`clean`], both when the
//! dataset is prepared and when a symptom description is scored. Keep it that way: a second
//! cleaning routine would let the two paths drift apart.

/// Fixed stop-word set removed during normalisation.
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "through", "during", "before", "after", "above", "below", "up", "down",
    "in", "out", "on", "off", "over", "under",
];

/// Tokens of this many characters or fewer are dropped.
const MIN_TOKEN_CHARS: usize = 2;

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Normalise free text for classification.
///
/// Lowercases, strips ASCII punctuation, collapses whitespace, then drops stop words and
/// tokens of two characters or fewer. The result is a single-space separated token string,
/// possibly empty.
pub fn clean(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    lowered
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_TOKEN_CHARS && !is_stop_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalise an optional value; a missing value cleans to the empty string.
pub fn clean_value(text: Option<&str>) -> String {
    text.map(clean).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_lowercases_and_strips_punctuation() {
        assert_eq!(
            clean("Severe HEADACHE, nausea... & blurred-vision!"),
            "severe headache nausea blurredvision"
        );
    }

    #[test]
    fn test_clean_drops_stop_words_and_short_tokens() {
        assert_eq!(
            clean("I have had a fever on and off for two days"),
            "fever two days"
        );
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean("  itchy \t\n  scaly   skin  "), "itchy scaly skin");
    }

    #[test]
    fn test_clean_content_free_input_is_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("I am, it is... ok"), "");
        assert_eq!(clean_value(None), "");
    }

    #[test]
    fn test_clean_counts_characters_not_bytes() {
        // Two characters, four bytes.
        assert_eq!(clean("éé fièvre"), "fièvre");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "I have a headache and feel dizzy",
            "My skin is red and itchy with scaly patches!!",
            "Chest pain; shortness of breath (since Monday)",
            "   ",
            "THE THE the",
            "Ça me gratte, vraiment beaucoup",
        ];

        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_clean_output_has_no_punctuation_or_stop_words() {
        let cleaned = clean("Over the past week: I've had (mild) chills, and the cough is worse.");
        assert!(!cleaned.chars().any(|c| c.is_ascii_punctuation()));
        for token in cleaned.split(' ') {
            assert!(!is_stop_word(token), "stop word {token:?} survived");
            assert!(token.chars().count() > 2);
        }
    }
}
