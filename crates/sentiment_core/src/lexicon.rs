use std::collections::HashSet;

/// English stopwords removed before classification.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// ASCII punctuation characters, each treated as a single-character token.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Word filters applied after tokenization: stopwords, personal names and punctuation.
///
/// All lookups expect an already lowercased word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    names: HashSet<String>,
    punctuation: HashSet<String>,
}

impl Lexicon {
    pub fn new<S, N>(stop_words: S, names: N) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_string())
                .collect(),
            names: names.into_iter().map(|n| n.as_ref().to_lowercase()).collect(),
            punctuation: PUNCTUATION.chars().map(String::from).collect(),
        }
    }

    /// Built-in English stopwords and no names.
    pub fn english() -> Self {
        Self::new(ENGLISH_STOPWORDS.iter().copied(), std::iter::empty::<&str>())
    }

    /// Adds names to the filter, lowercasing them.
    pub fn with_names<N>(mut self, names: N) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        self.names
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn is_name(&self, word: &str) -> bool {
        self.names.contains(word)
    }

    pub fn is_punctuation(&self, word: &str) -> bool {
        self.punctuation.contains(word)
    }

    /// True when the word must not reach the classifier.
    pub fn is_filtered(&self, word: &str) -> bool {
        self.is_stop_word(word) || self.is_name(word) || self.is_punctuation(word)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}
