use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_info};
use sentiment_core::{Lexicon, ENGLISH_STOPWORDS};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read word list {path:?}: {source}")]
    WordList { path: PathBuf, source: io::Error },
    #[error("failed to read corpus {path:?}: {source}")]
    Corpus { path: PathBuf, source: io::Error },
    #[error("corpus {0:?} contains no labeled documents")]
    Empty(PathBuf),
}

/// Word list files that make up a lexicon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusPaths {
    /// Replaces the built-in English stopwords when set.
    pub stopwords: Option<PathBuf>,
    pub names: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDocument {
    pub label: String,
    pub text: String,
}

/// Reads one entry per line, skipping blank lines and `#` comments.
pub fn load_word_list(path: &Path) -> Result<Vec<String>, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::WordList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

pub fn load_lexicon(paths: &CorpusPaths) -> Result<Lexicon, CorpusError> {
    let mut lexicon = match &paths.stopwords {
        Some(path) => {
            let words = load_word_list(path)?;
            engine_info!("Loaded {} stopwords from {:?}", words.len(), path);
            Lexicon::new(words.iter().map(|w| w.to_lowercase()), std::iter::empty::<&str>())
        }
        None => Lexicon::new(ENGLISH_STOPWORDS.iter().copied(), std::iter::empty::<&str>()),
    };

    for path in &paths.names {
        let names = load_word_list(path)?;
        engine_info!("Loaded {} names from {:?}", names.len(), path);
        lexicon = lexicon.with_names(names);
    }
    Ok(lexicon)
}

fn corpus_err(path: &Path) -> impl FnOnce(io::Error) -> CorpusError {
    let path = path.to_path_buf();
    move |source| CorpusError::Corpus { path, source }
}

/// Reads `<root>/<label>/<document>` files; each subdirectory name is a label.
///
/// Documents are returned sorted by label, then file name.
pub fn read_labeled_corpus(root: &Path) -> Result<Vec<LabeledDocument>, CorpusError> {
    let mut label_dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(corpus_err(root))? {
        let entry = entry.map_err(corpus_err(root))?;
        if entry.file_type().map_err(corpus_err(&entry.path()))?.is_dir() {
            label_dirs.push(entry.path());
        }
    }
    label_dirs.sort();

    let mut documents = Vec::new();
    for dir in label_dirs {
        let Some(label) = dir.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).map_err(corpus_err(&dir))? {
            let entry = entry.map_err(corpus_err(&dir))?;
            if entry.file_type().map_err(corpus_err(&entry.path()))?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        engine_debug!("Label {:?}: {} documents", label, files.len());

        for file in files {
            let bytes = fs::read(&file).map_err(corpus_err(&file))?;
            documents.push(LabeledDocument {
                label: label.to_string(),
                text: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
    }

    if documents.is_empty() {
        return Err(CorpusError::Empty(root.to_path_buf()));
    }
    Ok(documents)
}
