//! LiDAR Dataset Crate
//!
//! Point-cloud dataset loaders for semantic-segmentation training: raw scan
//! and label decoding, YAML-configured label remapping, and per-sample
//! indexed access over SemanticKITTI, DENSE, and nuScenes storage layouts.
//! This crate is model-agnostic and focuses on data parsing and label
//! transformation.

pub mod dataset;
pub mod datasets;
pub mod error;
pub mod mapping;
pub mod registry;
pub mod walk;

pub use dataset::{Condition, Phase, PointCloudDataset, Sample};
pub use datasets::{
    CycleDenseDataset, DenseDataset, NuscenesDataset, ScanInfo, SemanticKittiDataset,
    SensorCatalog,
};
pub use error::DataError;
pub use mapping::{IGNORE_LABEL, LabelMapping, SplitEntry, to_train_labels, to_train_labels_seq};
pub use registry::{DatasetKind, Registry};
pub use walk::{FilePaths, file_paths};
