use std::fs;

use pretty_assertions::assert_eq;
use sentiment_engine::{
    load_lexicon, load_word_list, read_labeled_corpus, CorpusError, CorpusPaths, LabeledDocument,
};
use tempfile::TempDir;

#[test]
fn word_list_skips_blank_lines_and_comments() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("male.txt");
    fs::write(&path, "# names corpus\nAaron\n\n  Abe  \n#Zed\n").unwrap();

    assert_eq!(load_word_list(&path).unwrap(), vec!["Aaron", "Abe"]);
}

#[test]
fn lexicon_merges_name_files_and_keeps_builtin_stopwords() {
    let temp = TempDir::new().unwrap();
    let male = temp.path().join("male.txt");
    let female = temp.path().join("female.txt");
    fs::write(&male, "Aaron\nAbe\n").unwrap();
    fs::write(&female, "Abbey\n").unwrap();

    let lexicon = load_lexicon(&CorpusPaths {
        stopwords: None,
        names: vec![male, female],
    })
    .unwrap();

    assert_eq!(lexicon.name_count(), 3);
    assert!(lexicon.is_name("abbey"));
    assert!(lexicon.is_stop_word("the"));
}

#[test]
fn stopword_file_replaces_builtin_list() {
    let temp = TempDir::new().unwrap();
    let stopwords = temp.path().join("stopwords.txt");
    fs::write(&stopwords, "Movie\nfilm\n").unwrap();

    let lexicon = load_lexicon(&CorpusPaths {
        stopwords: Some(stopwords),
        names: Vec::new(),
    })
    .unwrap();

    assert_eq!(lexicon.stop_word_count(), 2);
    assert!(lexicon.is_stop_word("movie"));
    assert!(!lexicon.is_stop_word("the"));
}

#[test]
fn missing_word_list_names_the_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");
    let err = load_lexicon(&CorpusPaths {
        stopwords: None,
        names: vec![missing.clone()],
    })
    .unwrap_err();

    match err {
        CorpusError::WordList { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn labeled_corpus_uses_directory_names_as_labels() {
    let temp = TempDir::new().unwrap();
    let pos = temp.path().join("pos");
    let neg = temp.path().join("neg");
    fs::create_dir(&pos).unwrap();
    fs::create_dir(&neg).unwrap();
    fs::write(pos.join("cv001.txt"), "loved it").unwrap();
    fs::write(pos.join("cv000.txt"), "great fun").unwrap();
    fs::write(neg.join("cv000.txt"), "hated it").unwrap();
    fs::write(temp.path().join("README"), "ignored").unwrap();

    let documents = read_labeled_corpus(temp.path()).unwrap();
    let expected = vec![
        LabeledDocument {
            label: "neg".to_string(),
            text: "hated it".to_string(),
        },
        LabeledDocument {
            label: "pos".to_string(),
            text: "great fun".to_string(),
        },
        LabeledDocument {
            label: "pos".to_string(),
            text: "loved it".to_string(),
        },
    ];
    assert_eq!(documents, expected);
}

#[test]
fn empty_corpus_is_an_error() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(
        read_labeled_corpus(temp.path()),
        Err(CorpusError::Empty(_))
    ));
}
