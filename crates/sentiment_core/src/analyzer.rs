use crate::{features, Classifier, FeatureSet, Lexicon, Sentiment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub sentiment: Sentiment,
    pub label: String,
    pub features: FeatureSet,
}

/// Normalizes text with a lexicon and hands the word counts to a classifier.
pub struct SentimentAnalyzer {
    lexicon: Lexicon,
    classifier: Box<dyn Classifier>,
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Lexicon, classifier: impl Classifier + 'static) -> Self {
        Self {
            lexicon,
            classifier: Box::new(classifier),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn labels(&self) -> Vec<&str> {
        self.classifier.labels()
    }

    pub fn features(&self, text: &str) -> FeatureSet {
        features(text, &self.lexicon)
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        let features = self.features(text);
        let label = self.classifier.classify(&features).to_string();
        Analysis {
            sentiment: Sentiment::from_label(&label),
            label,
            features,
        }
    }
}
