use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::FeatureSet;

/// Log probability assigned when a label has never been observed with a known feature name.
const UNSEEN_LOG_PROB: f64 = -1e300;

/// Expected likelihood estimate smoothing (add one half to every bin).
const ELE_GAMMA: f64 = 0.5;

/// Anything that maps a word-count feature set to a label.
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &FeatureSet) -> &str;

    fn labels(&self) -> Vec<&str>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("model has no labels")]
    NoLabels,
    #[error("label {0:?} has no training samples")]
    EmptyLabel(String),
    #[error("feature {feature:?} references unknown label {label:?}")]
    UnknownLabel { feature: String, label: String },
}

/// Observed values of one feature name under one label.
///
/// `absent` counts training samples of the label that lacked the feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCounts {
    #[serde(default)]
    pub absent: u64,
    #[serde(default)]
    pub values: BTreeMap<u32, u64>,
}

impl ValueCounts {
    fn total(&self) -> u64 {
        self.absent + self.values.values().sum::<u64>()
    }

    fn count(&self, value: Option<u32>) -> u64 {
        match value {
            Some(value) => self.values.get(&value).copied().unwrap_or(0),
            None => self.absent,
        }
    }

    fn prob(&self, value: Option<u32>, bins: usize) -> f64 {
        ele(self.count(value), self.total(), bins)
    }
}

fn ele(count: u64, total: u64, bins: usize) -> f64 {
    let denominator = total as f64 + ELE_GAMMA * bins as f64;
    if denominator <= 0.0 {
        return 0.0;
    }
    (count as f64 + ELE_GAMMA) / denominator
}

/// On-disk layout of a trained model: raw counts, probabilities are derived on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFile {
    pub label_counts: BTreeMap<String, u64>,
    /// Feature name, then label, then value counts.
    #[serde(default)]
    pub features: BTreeMap<String, BTreeMap<String, ValueCounts>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FeatureStats {
    by_label: BTreeMap<String, ValueCounts>,
    /// Distinct values (absence included) seen across all labels.
    bins: usize,
}

impl FeatureStats {
    fn new(by_label: BTreeMap<String, ValueCounts>) -> Self {
        let mut values = BTreeSet::new();
        let mut any_absent = false;
        for counts in by_label.values() {
            values.extend(counts.values.keys().copied());
            any_absent |= counts.absent > 0;
        }
        let bins = values.len() + usize::from(any_absent);
        Self { by_label, bins }
    }

    fn values(&self) -> BTreeSet<Option<u32>> {
        let mut values = BTreeSet::new();
        for counts in self.by_label.values() {
            values.extend(counts.values.keys().copied().map(Some));
            if counts.absent > 0 {
                values.insert(None);
            }
        }
        values
    }
}

/// A feature value whose likelihood differs the most between two labels.
#[derive(Debug, Clone, PartialEq)]
pub struct InformativeFeature {
    pub name: String,
    /// `None` stands for "word absent from the document".
    pub value: Option<u32>,
    pub most_likely: String,
    pub least_likely: String,
    pub ratio: f64,
}

/// Multinomial-over-values naive Bayes with expected likelihood smoothing.
///
/// Each word is a feature whose value is its count in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelFile", into = "ModelFile")]
pub struct NaiveBayesModel {
    label_counts: BTreeMap<String, u64>,
    features: BTreeMap<String, FeatureStats>,
}

impl NaiveBayesModel {
    /// Builds a model from labeled feature sets.
    pub fn train<'a, I>(samples: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (&'a FeatureSet, &'a str)>,
    {
        let mut label_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut features: BTreeMap<String, BTreeMap<String, ValueCounts>> = BTreeMap::new();

        for (feature_set, label) in samples {
            *label_counts.entry(label.to_string()).or_insert(0) += 1;
            for (name, value) in feature_set {
                let counts = features
                    .entry(name.clone())
                    .or_default()
                    .entry(label.to_string())
                    .or_default();
                *counts.values.entry(*value).or_insert(0) += 1;
            }
        }

        // Every label gets a distribution for every feature name; samples
        // without the word count as an "absent" observation.
        for by_label in features.values_mut() {
            for (label, &label_samples) in &label_counts {
                let counts = by_label.entry(label.clone()).or_default();
                let seen = counts.total();
                if label_samples > seen {
                    counts.absent += label_samples - seen;
                }
            }
        }

        Self::try_from(ModelFile {
            label_counts,
            features,
        })
    }

    pub fn sample_count(&self) -> u64 {
        self.label_counts.values().sum()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    fn log_prior(&self, label: &str) -> f64 {
        let count = self.label_counts.get(label).copied().unwrap_or(0);
        ele(count, self.sample_count(), self.label_counts.len()).ln()
    }

    fn log_scores(&self, features: &FeatureSet) -> Vec<(&str, f64)> {
        let known: Vec<(&FeatureStats, u32)> = features
            .iter()
            .filter_map(|(name, value)| {
                self.features
                    .get(name)
                    .filter(|stats| !stats.by_label.is_empty())
                    .map(|stats| (stats, *value))
            })
            .collect();

        self.label_counts
            .keys()
            .map(|label| {
                let likelihood: f64 = known
                    .iter()
                    .map(|(stats, value)| match stats.by_label.get(label) {
                        Some(counts) => counts.prob(Some(*value), stats.bins).ln(),
                        None => UNSEEN_LOG_PROB,
                    })
                    .sum();
                (label.as_str(), self.log_prior(label) + likelihood)
            })
            .collect()
    }

    /// Posterior probability of every label.
    pub fn prob_classify(&self, features: &FeatureSet) -> BTreeMap<String, f64> {
        let scores = self.log_scores(features);
        let max = scores
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = scores.iter().map(|(_, score)| (score - max).exp()).sum();
        scores
            .into_iter()
            .map(|(label, score)| (label.to_string(), (score - max).exp() / sum))
            .collect()
    }

    /// Feature values ranked by how strongly they separate two labels.
    ///
    /// Only labels that observed a value in training take part in its ratio,
    /// so a value seen under a single label has a ratio of 1. Equal ratios
    /// are ordered by name, then value.
    pub fn most_informative_features(&self, n: usize) -> Vec<InformativeFeature> {
        let mut ranked = Vec::new();
        for (name, stats) in &self.features {
            for value in stats.values() {
                let mut probs = stats
                    .by_label
                    .iter()
                    .filter(|(_, counts)| counts.count(value) > 0)
                    .map(|(label, counts)| (label, counts.prob(value, stats.bins)));
                let Some(first) = probs.next() else {
                    continue;
                };
                let (mut max, mut min) = (first, first);
                for entry in probs {
                    if entry.1 > max.1 {
                        max = entry;
                    }
                    if entry.1 < min.1 {
                        min = entry;
                    }
                }
                if min.1 <= 0.0 {
                    continue;
                }
                ranked.push(InformativeFeature {
                    name: name.clone(),
                    value,
                    most_likely: max.0.clone(),
                    least_likely: min.0.clone(),
                    ratio: max.1 / min.1,
                });
            }
        }
        ranked.sort_by(|a, b| {
            b.ratio
                .total_cmp(&a.ratio)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.value.cmp(&b.value))
        });
        ranked.truncate(n);
        ranked
    }
}

impl Classifier for NaiveBayesModel {
    /// Most probable label; ties go to the lexicographically greatest label.
    fn classify(&self, features: &FeatureSet) -> &str {
        let mut best: Option<(&str, f64)> = None;
        for (label, score) in self.log_scores(features) {
            match best {
                Some((_, best_score)) if score < best_score => {}
                _ => best = Some((label, score)),
            }
        }
        best.map(|(label, _)| label).unwrap_or_default()
    }

    fn labels(&self) -> Vec<&str> {
        self.label_counts.keys().map(String::as_str).collect()
    }
}

impl TryFrom<ModelFile> for NaiveBayesModel {
    type Error = ModelError;

    fn try_from(file: ModelFile) -> Result<Self, Self::Error> {
        if file.label_counts.is_empty() {
            return Err(ModelError::NoLabels);
        }
        if let Some((label, _)) = file.label_counts.iter().find(|(_, count)| **count == 0) {
            return Err(ModelError::EmptyLabel(label.clone()));
        }
        for (feature, by_label) in &file.features {
            if let Some(label) = by_label
                .keys()
                .find(|label| !file.label_counts.contains_key(*label))
            {
                return Err(ModelError::UnknownLabel {
                    feature: feature.clone(),
                    label: label.clone(),
                });
            }
        }

        let features = file
            .features
            .into_iter()
            .map(|(name, by_label)| (name, FeatureStats::new(by_label)))
            .collect();
        Ok(Self {
            label_counts: file.label_counts,
            features,
        })
    }
}

impl From<NaiveBayesModel> for ModelFile {
    fn from(model: NaiveBayesModel) -> Self {
        Self {
            label_counts: model.label_counts,
            features: model
                .features
                .into_iter()
                .map(|(name, stats)| (name, stats.by_label))
                .collect(),
        }
    }
}
