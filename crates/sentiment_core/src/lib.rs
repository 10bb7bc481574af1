//! Sentiment core: text normalization and bag-of-words classification, no IO.
mod analyzer;
mod classifier;
mod lexicon;
mod sentiment;
mod text;

pub use analyzer::{Analysis, SentimentAnalyzer};
pub use classifier::{
    Classifier, InformativeFeature, ModelError, ModelFile, NaiveBayesModel, ValueCounts,
};
pub use lexicon::{Lexicon, ENGLISH_STOPWORDS, PUNCTUATION};
pub use sentiment::{Sentiment, NEGATIVE_LABEL};
pub use text::{clean_words, features, tokenize, word_counts, FeatureSet};
