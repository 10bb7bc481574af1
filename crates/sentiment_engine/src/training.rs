use engine_logging::{engine_debug, engine_info};
use sentiment_core::{features, FeatureSet, Lexicon, ModelError, NaiveBayesModel};

use crate::LabeledDocument;

/// Trains a model on documents normalized exactly like incoming requests.
pub fn train_model(
    documents: &[LabeledDocument],
    lexicon: &Lexicon,
) -> Result<NaiveBayesModel, ModelError> {
    let samples: Vec<(FeatureSet, &str)> = documents
        .iter()
        .map(|doc| (features(&doc.text, lexicon), doc.label.as_str()))
        .collect();
    engine_debug!("Normalized {} training documents", samples.len());

    let model = NaiveBayesModel::train(samples.iter().map(|(fs, label)| (fs, *label)))?;
    engine_info!(
        "Trained model on {} documents with {} features",
        model.sample_count(),
        model.feature_count()
    );
    Ok(model)
}
