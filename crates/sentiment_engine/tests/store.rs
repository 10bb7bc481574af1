use std::fs;

use sentiment_core::{features, Classifier, Lexicon, NaiveBayesModel};
use sentiment_engine::{load_model, save_model, train_model, LabeledDocument, StoreError};
use tempfile::TempDir;

fn documents() -> Vec<LabeledDocument> {
    [
        ("pos", "Great fun, a great cast."),
        ("neg", "Awful plot and awful pacing."),
    ]
    .into_iter()
    .map(|(label, text)| LabeledDocument {
        label: label.to_string(),
        text: text.to_string(),
    })
    .collect()
}

fn model() -> NaiveBayesModel {
    train_model(&documents(), &Lexicon::english()).unwrap()
}

#[test]
fn save_creates_missing_model_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("models");
    assert!(!dir.exists());

    save_model(&dir.join("model.json"), &model()).unwrap();
    assert!(dir.is_dir());
    assert!(dir.join("model.json").is_file());
}

#[test]
fn save_replaces_existing_model() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("model.json");
    fs::write(&path, "stale").unwrap();

    save_model(&path, &model()).unwrap();
    assert_eq!(load_model(&path).unwrap(), model());
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1, "temp file left behind");
}

#[test]
fn no_partial_model_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("not_a_dir");
    fs::write(&not_a_dir, "x").unwrap();

    let result = save_model(&not_a_dir.join("model.json"), &model());
    assert!(matches!(result, Err(StoreError::OutputDir(_))));
    assert_eq!(fs::read_to_string(&not_a_dir).unwrap(), "x");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn saved_model_loads_and_classifies_the_same() {
    let temp = TempDir::new().unwrap();
    let lexicon = Lexicon::english();
    let model = train_model(&documents(), &lexicon).unwrap();

    let path = temp.path().join("nested").join("sentiment_classifier.json");
    let written = save_model(&path, &model).unwrap();
    assert_eq!(written, path);

    let loaded = load_model(&path).unwrap();
    assert_eq!(loaded, model);
    let input = features("What awful pacing", &lexicon);
    assert_eq!(loaded.classify(&input), "neg");
}

#[test]
fn load_reports_missing_and_corrupt_files() {
    let temp = TempDir::new().unwrap();

    let missing = temp.path().join("missing.json");
    assert!(matches!(load_model(&missing), Err(StoreError::Read { .. })));

    let corrupt = temp.path().join("corrupt.json");
    fs::write(&corrupt, "not json").unwrap();
    assert!(matches!(load_model(&corrupt), Err(StoreError::Parse { .. })));

    let invalid = temp.path().join("invalid.json");
    fs::write(&invalid, r#"{"label_counts": {"pos": 0}}"#).unwrap();
    let err = load_model(&invalid).unwrap_err();
    assert!(err.to_string().contains("has no training samples"), "{err}");
}
