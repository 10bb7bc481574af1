use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use engine_logging::{engine_debug, engine_info, engine_warn};
use sentiment_core::SentimentAnalyzer;
use sentiment_engine::{
    load_lexicon, load_model, read_labeled_corpus, save_model, shutdown_signal, train_model,
    SentimentServer,
};

use crate::config::ServiceConfig;

/// Loads the lexicon and model named by the config.
pub fn build_analyzer(config: &ServiceConfig) -> Result<SentimentAnalyzer> {
    let lexicon = load_lexicon(&config.corpus_paths()).context("failed to load lexicon")?;
    if lexicon.name_count() == 0 {
        engine_warn!("No name lists configured; personal names will reach the classifier");
    }
    let model = load_model(&config.model_path)
        .with_context(|| format!("failed to load model {:?}", config.model_path))?;
    Ok(SentimentAnalyzer::new(lexicon, model))
}

pub async fn serve(config: &ServiceConfig) -> Result<()> {
    let analyzer = Arc::new(build_analyzer(config)?);
    let settings = config.server_settings()?;
    let server = SentimentServer::bind(&settings, analyzer).await?;
    server.serve(shutdown_signal()).await?;
    Ok(())
}

/// Classifies one text and returns the reply the endpoint would send.
pub fn classify(config: &ServiceConfig, text: &str) -> Result<&'static str> {
    let analyzer = build_analyzer(config)?;
    let analysis = analyzer.analyze(text);
    engine_debug!("Features {:?} -> {:?}", analysis.features, analysis.label);
    Ok(analysis.sentiment.message())
}

/// Trains on `<corpus>/<label>/*` and writes the model to `output`.
pub fn train(
    config: &ServiceConfig,
    corpus: &Path,
    output: &Path,
    show_features: usize,
) -> Result<PathBuf> {
    let lexicon = load_lexicon(&config.corpus_paths()).context("failed to load lexicon")?;
    let documents = read_labeled_corpus(corpus)?;
    let model = train_model(&documents, &lexicon)?;

    for feature in model.most_informative_features(show_features) {
        let value = match feature.value {
            Some(count) => count.to_string(),
            None => "absent".to_string(),
        };
        engine_info!(
            "{:>20} = {:<6} {} : {} = {:.1} : 1",
            feature.name,
            value,
            feature.most_likely,
            feature.least_likely,
            feature.ratio
        );
    }

    let written = save_model(output, &model)?;
    Ok(written)
}
