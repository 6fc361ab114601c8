//! Loading of the bundled model and label list.

mod labels;
mod store;

pub use labels::LabelList;
pub use store::{AssetBytes, AssetStore, DirAssets, MemoryAssets};

use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::InferenceEngine;

/// Load the model asset and build an engine from it.
///
/// # Errors
///
/// Returns [`Error::AssetNotFound`] if the asset is missing and
/// [`Error::ModelLoad`] if the engine rejects its contents.
pub fn load_model<E, S>(store: &S, model_path: &Path) -> Result<E>
where
    E: InferenceEngine,
    S: AssetStore + ?Sized,
{
    let bytes = store.read_bytes(model_path)?;

    tracing::info!("Loading model {} ({} bytes)", model_path.display(), bytes.len());

    E::from_model_bytes(&bytes).map_err(|source| Error::ModelLoad {
        path: model_path.to_path_buf(),
        source,
    })
}

/// Load the label list, one label per line.
///
/// # Errors
///
/// Returns [`Error::AssetNotFound`] if the asset is missing and
/// [`Error::EmptyLabels`] if it has no lines.
pub fn load_labels<S>(store: &S, label_path: &Path) -> Result<LabelList>
where
    S: AssetStore + ?Sized,
{
    let reader = BufReader::new(store.open(label_path)?);
    let labels = LabelList::from_reader(reader)?;

    if labels.is_empty() {
        return Err(Error::EmptyLabels {
            path: label_path.to_path_buf(),
        });
    }

    tracing::info!("Loaded {} labels from {}", labels.len(), label_path.display());

    Ok(labels)
}

/// Load both the engine and its labels.
///
/// # Errors
///
/// See [`load_model`] and [`load_labels`].
pub fn load_assets<E, S>(store: &S, model_path: &Path, label_path: &Path) -> Result<(E, LabelList)>
where
    E: InferenceEngine,
    S: AssetStore + ?Sized,
{
    let engine = load_model(store, model_path)?;
    let labels = load_labels(store, label_path)?;
    Ok((engine, labels))
}
