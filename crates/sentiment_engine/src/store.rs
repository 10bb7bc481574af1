use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use sentiment_core::{Classifier, NaiveBayesModel};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read model {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid model {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize model: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

fn model_dir(path: &Path) -> Result<PathBuf, StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    match fs::metadata(&dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(StoreError::OutputDir(format!("{dir:?} is not a directory")));
        }
        Err(_) => {
            fs::create_dir_all(&dir).map_err(|e| StoreError::OutputDir(e.to_string()))?;
        }
    }
    Ok(dir)
}

/// Writes the model bytes to a temp file next to `path`, then renames it over `path`.
fn write_model_bytes(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let dir = model_dir(path)?;
    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content)?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

pub fn load_model(path: &Path) -> Result<NaiveBayesModel, StoreError> {
    let content = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let model: NaiveBayesModel =
        serde_json::from_slice(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    engine_info!(
        "Loaded model {:?}: labels {:?}, {} features, {} training samples",
        path,
        model.labels(),
        model.feature_count(),
        model.sample_count()
    );
    Ok(model)
}

/// Saves the model as pretty-printed JSON, replacing any existing file.
///
/// Missing parent directories are created. Readers never see a partial file.
pub fn save_model(path: &Path, model: &NaiveBayesModel) -> Result<PathBuf, StoreError> {
    if path.file_name().is_none() {
        return Err(StoreError::OutputDir(format!("{path:?} has no file name")));
    }
    let content = serde_json::to_vec_pretty(model).map_err(StoreError::Serialize)?;
    write_model_bytes(path, &content)?;
    engine_info!("Saved model to {:?} ({} bytes)", path, content.len());
    Ok(path.to_path_buf())
}
