use std::sync::Once;

use pretty_assertions::assert_eq;
use sentiment_core::{clean_words, features, tokenize, word_counts, FeatureSet, Lexicon};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn tokens(text: &str) -> Vec<String> {
    tokenize(text)
}

#[test]
fn splits_negative_contractions_and_final_period() {
    init_logging();
    assert_eq!(tokens("I don't like it."), vec!["I", "do", "n't", "like", "it", "."]);
    assert_eq!(tokens("They can't stop"), vec!["They", "ca", "n't", "stop"]);
}

#[test]
fn splits_clitics_and_exclamation() {
    assert_eq!(tokens("It's great!"), vec!["It", "'s", "great", "!"]);
    assert_eq!(
        tokens("We'll see, you're right"),
        vec!["We", "'ll", "see", ",", "you", "'re", "right"]
    );
}

#[test]
fn rewrites_double_quotes() {
    assert_eq!(
        tokens("She said \"wow\", then left."),
        vec!["She", "said", "``", "wow", "''", ",", "then", "left", "."]
    );
}

#[test]
fn splits_fused_contractions() {
    assert_eq!(tokens("I cannot wait"), vec!["I", "can", "not", "wait"]);
    assert_eq!(tokens("gonna wanna"), vec!["gon", "na", "wan", "na"]);
}

#[test]
fn keeps_numbers_and_abbreviations_together() {
    assert_eq!(tokens("Price: $5,000"), vec!["Price", ":", "$", "5,000"]);
    assert_eq!(
        tokens("Made in the U.S. (mostly)"),
        vec!["Made", "in", "the", "U.S.", "(", "mostly", ")"]
    );
}

#[test]
fn sentence_periods_split_mid_text() {
    assert_eq!(
        tokens("Great movie. Loved it... truly"),
        vec!["Great", "movie", ".", "Loved", "it", "...", "truly"]
    );
}

#[test]
fn empty_and_blank_text_have_no_tokens() {
    assert!(tokens("").is_empty());
    assert!(tokens("   \n\t ").is_empty());
}

#[test]
fn clean_words_drops_stopwords_names_and_non_alpha() {
    let lexicon = Lexicon::english().with_names(["John"]);
    let words = clean_words(tokenize("John loved the movie, but I didn't!"), &lexicon);
    assert_eq!(words, vec!["loved", "movie"]);
}

#[test]
fn clean_words_lowercases_and_keeps_duplicates() {
    let lexicon = Lexicon::english();
    let words = clean_words(["GREAT", "Great", "r2d2", "", "café"], &lexicon);
    assert_eq!(words, vec!["great", "great", "café"]);
}

#[test]
fn clean_words_rejects_letter_numbers_and_combining_marks() {
    let lexicon = Lexicon::english();
    let words = clean_words(["Ⅻ", "chapterⅫ", "ⅰⅱ", "cafe\u{301}", "Ωmega", "日本"], &lexicon);
    assert_eq!(words, vec!["ωmega", "日本"]);
}

#[test]
fn word_counts_sum_to_word_total() {
    let words = vec!["good", "bad", "good", "good"];
    let counts = word_counts(words.clone());
    let expected: FeatureSet = [("bad".to_string(), 1), ("good".to_string(), 3)]
        .into_iter()
        .collect();
    assert_eq!(counts, expected);
    assert_eq!(counts.values().sum::<u32>() as usize, words.len());
}

#[test]
fn features_runs_the_whole_pipeline() {
    let lexicon = Lexicon::english();
    let counts = features("What a wonderful, WONDERFUL film. Wonderful!", &lexicon);
    let expected: FeatureSet = [("film".to_string(), 1), ("wonderful".to_string(), 3)]
        .into_iter()
        .collect();
    assert_eq!(counts, expected);
}
