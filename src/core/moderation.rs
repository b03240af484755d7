//! Chirp body moderation
//!
//! Replaces known profane words with `****`. Matching is case-insensitive
//! and whole-word only; words are delimited by single spaces, so punctuation
//! attached to a word defeats the filter (matching the original behavior).

/// Words replaced by the filter
const PROFANE_WORDS: [&str; 4] = ["profane", "kerfuffle", "sharbert", "fornax"];

/// Replacement for a filtered word
const REPLACEMENT: &str = "****";

/// Replace profane words in a chirp body
pub fn clean_chirp_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                REPLACEMENT
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_body_replaces_profane_words() {
        assert_eq!(
            clean_chirp_body("This is a kerfuffle opinion I need to share with the world"),
            "This is a **** opinion I need to share with the world"
        );
    }

    #[test]
    fn test_clean_body_is_case_insensitive() {
        assert_eq!(
            clean_chirp_body("I hear Mastodon is better than Chirpy. sharbert I need to migrate"),
            "I hear Mastodon is better than Chirpy. **** I need to migrate"
        );
        assert_eq!(clean_chirp_body("SHARBERT"), "****");
        assert_eq!(clean_chirp_body("Fornax"), "****");
    }

    #[test]
    fn test_clean_body_ignores_punctuated_words() {
        // "Sharbert!" is not the word "sharbert"
        assert_eq!(
            clean_chirp_body("I really need a kerfuffle to go to bed sooner, Fornax !"),
            "I really need a **** to go to bed sooner, **** !"
        );
        assert_eq!(clean_chirp_body("Sharbert!"), "Sharbert!");
    }

    #[test]
    fn test_clean_body_passes_clean_text_through() {
        let body = "I had something interesting for breakfast";
        assert_eq!(clean_chirp_body(body), body);
    }

    #[test]
    fn test_clean_body_empty() {
        assert_eq!(clean_chirp_body(""), "");
    }
}
