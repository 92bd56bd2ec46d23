//! Extractive summarization by sentence scoring.
//!
//! Every sentence gets a score from four features:
//!
//! | Feature | Weight | Meaning |
//! |---------|--------|---------|
//! | title | 1.5 | share of title keywords the sentence repeats |
//! | frequency | 2.0 | density of the document's top keywords in the sentence |
//! | length | 1.0 | closeness to [`IDEAL_SENTENCE_WORDS`] words |
//! | position | 1.0 | where the sentence sits in the article (leads and endings score higher) |
//!
//! The highest scoring sentences are returned in document order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Sentence length that earns the full length score.
pub const IDEAL_SENTENCE_WORDS: f64 = 20.0;

/// Number of document keywords used for the frequency feature.
pub const KEYWORD_COUNT: usize = 10;

static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9']+").unwrap());

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
        "during", "each", "few", "for", "from", "further", "had", "has", "have", "having", "he",
        "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in",
        "into", "is", "it", "it's", "its", "itself", "just", "me", "more", "most", "my",
        "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
        "our", "ours", "ourselves", "out", "over", "own", "said", "same", "says", "she",
        "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
        "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
        "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
        "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
        "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Split text into trimmed sentences, keeping terminal punctuation.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| WORD.is_match(s))
        .collect()
}

fn words(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// The `count` most frequent non-stopwords with their relative frequency.
///
/// Ties are broken alphabetically so the result is stable.
pub fn keywords(text: &str, count: usize) -> HashMap<String, f64> {
    let all_words = words(text);
    let total = all_words.len().max(1) as f64;

    let mut freq: HashMap<String, usize> = HashMap::new();
    for word in all_words.into_iter().filter(|w| !is_stopword(w)) {
        *freq.entry(word).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(count)
        .map(|(word, n)| (word, n as f64 / total))
        .collect()
}

fn title_score(sentence_words: &[String], title_words: &HashSet<String>) -> f64 {
    if title_words.is_empty() {
        return 0.0;
    }
    let hits = sentence_words
        .iter()
        .filter(|w| !is_stopword(w) && title_words.contains(*w))
        .collect::<HashSet<_>>()
        .len();
    hits as f64 / title_words.len() as f64
}

fn length_score(word_count: usize) -> f64 {
    (1.0 - (IDEAL_SENTENCE_WORDS - word_count as f64).abs() / IDEAL_SENTENCE_WORDS).max(0.0)
}

fn position_score(index: usize, total: usize) -> f64 {
    let normalized = (index + 1) as f64 / total.max(1) as f64;
    match normalized {
        n if n <= 0.1 => 0.17,
        n if n <= 0.2 => 0.23,
        n if n <= 0.3 => 0.14,
        n if n <= 0.4 => 0.08,
        n if n <= 0.5 => 0.05,
        n if n <= 0.6 => 0.04,
        n if n <= 0.7 => 0.06,
        n if n <= 0.8 => 0.04,
        n if n <= 0.9 => 0.04,
        _ => 0.15,
    }
}

fn frequency_score(sentence_words: &[String], keywords: &HashMap<String, f64>) -> f64 {
    if sentence_words.is_empty() {
        return 0.0;
    }
    let sum: f64 = sentence_words.iter().filter_map(|w| keywords.get(w)).sum();
    sum / sentence_words.len() as f64 * 10.0
}

/// Pick the `max_sentences` best sentences of `text` and join them in document order.
///
/// Returns an empty string when `text` has no sentences.
pub fn summarize(title: &str, text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return String::new();
    }

    let keywords = keywords(text, KEYWORD_COUNT);
    let title_words: HashSet<String> = words(title)
        .into_iter()
        .filter(|w| !is_stopword(w))
        .collect();

    let total = sentences.len();
    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let sentence_words = words(sentence);
            let score = (title_score(&sentence_words, &title_words) * 1.5
                + frequency_score(&sentence_words, &keywords) * 2.0
                + length_score(sentence_words.len())
                + position_score(index, total))
                / 4.0;
            (index, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(max_sentences);
    scored.sort_by_key(|(index, _)| *index);

    scored
        .into_iter()
        .map(|(index, _)| sentences[index].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
