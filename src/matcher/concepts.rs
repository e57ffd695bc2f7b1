//! Key-concept extraction from questions
//!
//! Multi-word domain phrases are collapsed into single tokens before
//! tokenization so they match atomically; stop words and short filler are
//! discarded; digit sequences survive whatever surrounds them so hole
//! numbers match regardless of phrasing ("#16", "16th", "hole 16").

use std::collections::HashSet;

/// Domain phrases that name one concept and must not be split
const COMPOUND_CONCEPTS: &[(&str, &str)] = &[
    ("out of bounds", "out_of_bounds"),
    ("ground under repair", "ground_under_repair"),
    ("no play zone", "no_play_zone"),
    ("penalty area", "penalty_area"),
    ("lost ball", "lost_ball"),
    ("provisional ball", "provisional_ball"),
    ("purple line", "purple_line"),
    ("train tracks", "train_tracks"),
    ("white line", "white_line"),
    ("white stakes", "white_stakes"),
    ("red stakes", "red_stakes"),
    ("yellow stakes", "yellow_stakes"),
    ("green stakes", "green_stakes"),
    ("cart path", "cart_path"),
    ("turf nursery", "turf_nursery"),
    ("sod farm", "sod_farm"),
    ("drop zone", "drop_zone"),
    ("dropping zone", "dropping_zone"),
    ("casual water", "casual_water"),
    ("temporary water", "temporary_water"),
    ("loose impediment", "loose_impediment"),
    ("putting green", "putting_green"),
    ("teeing area", "teeing_area"),
    ("general area", "general_area"),
];

/// Filler discarded during extraction
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "my", "your", "his", "her", "their",
    "our", "its", "i", "you", "he", "she", "we", "they", "it", "me", "him", "them", "us",
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have",
    "has", "had", "what", "which", "who", "whom", "this", "that", "these", "those", "can",
    "could", "will", "would", "shall", "should", "may", "might", "must", "in", "on", "at",
    "by", "for", "with", "about", "into", "onto", "from", "of", "to", "as", "not", "no",
    "there", "here", "when", "where", "why", "how", "all", "any", "some", "very", "just",
    "get", "got", "near", "now",
];

/// Lowercase and trim a question
pub fn normalize(question: &str) -> String {
    question.to_lowercase().trim().to_string()
}

/// Extract the set of key concepts from a normalized question
pub fn extract_concepts(normalized: &str) -> HashSet<String> {
    let mut text = normalized.to_string();
    for (phrase, token) in COMPOUND_CONCEPTS {
        text = text.replace(phrase, token);
    }

    let mut concepts = HashSet::new();
    for token in text.split(|c: char| !c.is_alphanumeric() && c != '_' && c != '#') {
        if token.is_empty() {
            continue;
        }
        if token.chars().any(|c| c.is_ascii_digit()) {
            for run in digit_runs(token) {
                concepts.insert(run);
            }
            continue;
        }
        let token = token.trim_matches('#');
        if token.len() > 2 && !STOP_WORDS.contains(&token) {
            concepts.insert(token.to_string());
        }
    }

    concepts
}

/// Contiguous digit sequences inside a token ("16th" -> ["16"])
fn digit_runs(token: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in token.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Phrase length at or below which containment must respect word boundaries
const BOUNDARY_MATCH_MAX_LEN: usize = 3;

/// Test whether a trigger phrase occurs in the normalized question.
///
/// Short phrases ("ob") must sit on word boundaries so they cannot match
/// inside an unrelated longer word.
pub fn phrase_present(normalized: &str, phrase: &str) -> bool {
    if phrase.len() > BOUNDARY_MATCH_MAX_LEN {
        return normalized.contains(phrase);
    }

    let mut start = 0;
    while let Some(pos) = normalized[start..].find(phrase) {
        let begin = start + pos;
        let end = begin + phrase.len();
        let before_ok = begin == 0
            || !normalized[..begin]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
        let after_ok = end == normalized.len()
            || !normalized[end..].chars().next().is_some_and(char::is_alphanumeric);
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_phrases_collapse() {
        let concepts = extract_concepts("my ball went out of bounds near the cart path");
        assert!(concepts.contains("out_of_bounds"));
        assert!(concepts.contains("cart_path"));
        assert!(!concepts.contains("bounds"));
    }

    #[test]
    fn test_stop_words_discarded() {
        let concepts = extract_concepts("what do i do when the ball is in the water");
        assert!(concepts.contains("ball"));
        assert!(concepts.contains("water"));
        assert!(!concepts.contains("what"));
        assert!(!concepts.contains("the"));
    }

    #[test]
    fn test_digit_sequences_survive_suffixes() {
        for phrasing in ["water on 16", "water on #16", "water on the 16th hole"] {
            let concepts = extract_concepts(&normalize(phrasing));
            assert!(concepts.contains("16"), "missing 16 in {phrasing:?}");
        }
    }

    #[test]
    fn test_short_phrase_needs_word_boundary() {
        assert!(phrase_present("my ball is ob off the tee", "ob"));
        assert!(phrase_present("ob over the fence", "ob"));
        // Must not match inside "problem" or "lob"
        assert!(!phrase_present("i have a problem with my lob wedge", "ob"));
    }

    #[test]
    fn test_long_phrase_is_plain_containment() {
        assert!(phrase_present(
            "i lost my ball in the woods on the back nine",
            "lost my ball in the woods"
        ));
    }
}
