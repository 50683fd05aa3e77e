//! SemanticKITTI-style loader: flat binary scans with companion label files.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dataset::{Phase, PointCloudDataset, Sample};
use crate::datasets::{column_from_rows, points_from_rows, read_f32_rows, read_i32_blob};
use crate::error::DataError;
use crate::mapping::LabelMapping;
use crate::walk::file_paths;

/// Columns per scan row: xyz plus reflectance.
const SCAN_COLS: usize = 4;

/// Dataset over per-sequence `velodyne` folders of flat f32 scans.
///
/// Labels live in a sibling `labels` folder, one i32 per point, with the
/// semantic class in the low 16 bits and an instance id in the high 16.
pub struct SemanticKittiDataset {
    phase: Phase,
    return_ref: bool,
    mapping: LabelMapping,
    scan_paths: Vec<PathBuf>,
}

impl SemanticKittiDataset {
    /// Build the sample index for `phase` from the mapping file's split list.
    ///
    /// Split entries are sequence ids, zero-padded to two digits and joined
    /// as `<root>/<seq>/velodyne`; every file under each such folder becomes
    /// one sample. No label file is touched here.
    #[tracing::instrument(skip_all, fields(root = %data_path.as_ref().display(), %phase))]
    pub fn new(
        data_path: impl AsRef<Path>,
        phase: Phase,
        label_mapping: impl AsRef<Path>,
        return_ref: bool,
    ) -> Result<Self, DataError> {
        let mapping = LabelMapping::from_yaml_file(label_mapping)?;
        let folders = mapping.split(phase.split_key())?.to_vec();

        let mut scan_paths = Vec::new();
        for folder in &folders {
            let seq_dir = data_path
                .as_ref()
                .join(format!("{:0>2}", folder.as_string()))
                .join("velodyne");
            for path in file_paths(&seq_dir) {
                scan_paths.push(path?);
            }
        }
        info!(sequences = folders.len(), scans = scan_paths.len(), "indexed scans");

        Ok(Self {
            phase,
            return_ref,
            mapping,
            scan_paths,
        })
    }
}

impl PointCloudDataset for SemanticKittiDataset {
    fn len(&self) -> usize {
        self.scan_paths.len()
    }

    fn get(&self, index: usize) -> Result<Sample, DataError> {
        let scan_path = &self.scan_paths[index];
        let rows = read_f32_rows(scan_path, SCAN_COLS)?;
        let n = rows.len() / SCAN_COLS;

        let labels = if self.phase == Phase::Test {
            // the test split ships without annotations
            vec![0u8; n]
        } else {
            let label_path = label_path_for(scan_path);
            let raw_labels = read_i32_blob(&label_path)?;
            if raw_labels.len() != n {
                return Err(DataError::LabelCountMismatch {
                    path: label_path,
                    points: n,
                    labels: raw_labels.len(),
                });
            }
            self.mapping
                .map_all(raw_labels.into_iter().map(|l| l as u32))?
        };
        debug!(scan = %scan_path.display(), points = n, "decoded scan");

        Ok(Sample {
            points: points_from_rows(&rows, SCAN_COLS),
            labels: Some(labels),
            reference: self
                .return_ref
                .then(|| column_from_rows(&rows, SCAN_COLS, 3)),
        })
    }
}

/// Derive the label path from a scan path: the `velodyne` component becomes
/// `labels` and the extension becomes `.label`.
fn label_path_for(scan_path: &Path) -> PathBuf {
    let mut path = PathBuf::new();
    for component in scan_path.components() {
        if component.as_os_str() == "velodyne" {
            path.push("labels");
        } else {
            path.push(component.as_os_str());
        }
    }
    path.set_extension("label");
    path
}
