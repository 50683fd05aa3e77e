//! Error types for dataset loading and label mapping.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or reading a point-cloud dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("split must be train/val/test, got '{0}'")]
    InvalidPhase(String),

    #[error("condition must be clear/rain/fog, got '{0}'")]
    InvalidCondition(String),

    #[error("split '{0}' not present in label mapping")]
    MissingSplit(String),

    #[error("raw label {0} has no entry in the learning map")]
    UnmappedLabel(u32),

    #[error("label {0} has no name entry")]
    MissingLabelName(u32),

    #[error("dataset '{0}' already registered")]
    DuplicateDataset(String),

    #[error("unknown dataset '{name}', available: {known:?}")]
    UnknownDataset { name: String, known: Vec<String> },

    #[error("scan file {path:?}: {len} bytes is not a whole number of {cols}-column float rows")]
    MalformedScan { path: PathBuf, len: usize, cols: usize },

    #[error("label file {path:?}: scan has {points} points but {labels} labels")]
    LabelCountMismatch {
        path: PathBuf,
        points: usize,
        labels: usize,
    },

    #[error("container {path:?}: channel '{channel}' has {len} values, expected {expected}")]
    ChannelLengthMismatch {
        path: PathBuf,
        channel: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("catalog record '{table}' for token '{token}' missing field '{field}'")]
    CatalogField {
        table: String,
        token: String,
        field: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("pickle error: {0}")]
    Pickle(#[from] serde_pickle::Error),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}
