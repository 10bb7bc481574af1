//! Text normalization: tokenization, word filtering and word counting.
//!
//! The tokenizer follows the Penn Treebank conventions: punctuation becomes
//! its own token, clitics are split off their host word (`don't` becomes
//! `do` + `n't`), and double quotes are rewritten to ` `` ` / `''`.
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::Lexicon;

/// Word to occurrence count, the input of every classifier.
pub type FeatureSet = BTreeMap<String, u32>;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rules(table: &[(&str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).expect("tokenizer pattern"),
            replacement,
        })
        .collect()
}

static STARTING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        (r"([«“‘„]|`+)", " $1 "),
        (r#"^""#, "``"),
        (r"(``)", " $1 "),
        (r#"([ (\[{<])("|'{2})"#, "$1 `` "),
    ])
});

static PUNCTUATION: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        (r"([:,])([^\d])", " $1 $2"),
        (r"([:,])$", " $1 "),
        (r"\.{2,}", " $0 "),
        (r"[;@#$%&]", " $0 "),
        (r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2 $3 "),
        (r"[?!]", " $0 "),
        (r"([^'])' ", "$1 ' "),
        (r"\*", " $0 "),
        (r"[\]\[(){}<>]", " $0 "),
        (r"--", " -- "),
    ])
});

static ENDING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        (r"([»”’])", " $1 "),
        (r#"""#, " '' "),
        (r"(\S)('')", "$1 $2 "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
    ])
});

static CONTRACTIONS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        (r"(?i)\b(can)(not)\b", " $1 $2 "),
        (r"(?i)\b(d)('ye)\b", " $1 $2 "),
        (r"(?i)\b(gim)(me)\b", " $1 $2 "),
        (r"(?i)\b(gon)(na)\b", " $1 $2 "),
        (r"(?i)\b(got)(ta)\b", " $1 $2 "),
        (r"(?i)\b(lem)(me)\b", " $1 $2 "),
        (r"(?i)\b(more)('n)\b", " $1 $2 "),
        (r"(?i)\b(wan)(na)\b", " $1 $2 "),
        (r"(?i) ('t)(is)\b", " $1 $2 "),
        (r"(?i) ('t)(was)\b", " $1 $2 "),
    ])
});

fn apply(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |text, rule| {
        rule.pattern
            .replace_all(&text, rule.replacement)
            .into_owned()
    })
}

/// Splits free text into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let text = apply(&STARTING_QUOTES, text.to_string());
    let text = apply(&PUNCTUATION, text);
    let text = apply(&ENDING_QUOTES, format!(" {text} "));
    let text = apply(&CONTRACTIONS, text);

    let mut tokens = Vec::new();
    for token in text.split_whitespace() {
        match split_sentence_period(token) {
            Some(word) => {
                tokens.push(word.to_string());
                tokens.push(".".to_string());
            }
            None => tokens.push(token.to_string()),
        }
    }
    tokens
}

/// A word ending in a lone period ends a sentence; `U.S.` and `...` do not.
fn split_sentence_period(token: &str) -> Option<&str> {
    let word = token.strip_suffix('.')?;
    if word.is_empty() || word.contains('.') {
        return None;
    }
    Some(word)
}

/// Letters only; letter numbers such as `Ⅻ` do not count.
static LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}+$").expect("letters pattern"));

fn is_alphabetic(token: &str) -> bool {
    LETTERS.is_match(token)
}

/// Keeps alphabetic tokens, lowercases them and drops everything the lexicon filters.
pub fn clean_words<I, S>(tokens: I, lexicon: &Lexicon) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter(|token| is_alphabetic(token.as_ref()))
        .map(|token| token.as_ref().to_lowercase())
        .filter(|word| !lexicon.is_filtered(word))
        .collect()
}

pub fn word_counts<I, S>(words: I) -> FeatureSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts = FeatureSet::new();
    for word in words {
        *counts.entry(word.into()).or_insert(0) += 1;
    }
    counts
}

/// The full normalization pipeline: tokenize, clean, count.
pub fn features(text: &str, lexicon: &Lexicon) -> FeatureSet {
    word_counts(clean_words(tokenize(text), lexicon))
}
