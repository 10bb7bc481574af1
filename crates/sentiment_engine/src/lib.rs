//! Sentiment engine: corpus and model IO, training and the HTTP endpoint.
mod corpus;
mod server;
mod store;
mod training;

pub use corpus::{
    load_lexicon, load_word_list, read_labeled_corpus, CorpusError, CorpusPaths, LabeledDocument,
};
pub use server::{
    router, shutdown_signal, SentimentServer, ServerError, ServerSettings, MISSING_TEXT_MESSAGE,
    USAGE_MESSAGE,
};
pub use store::{load_model, save_model, StoreError};
pub use training::train_model;
