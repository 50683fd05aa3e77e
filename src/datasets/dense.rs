//! DENSE loader: HDF5 containers with six named channels per scan.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dataset::{Phase, PointCloudDataset, Sample};
use crate::datasets::read_dense_scan;
use crate::error::DataError;
use crate::mapping::LabelMapping;
use crate::walk::file_paths;

/// Dataset over HDF5 scan containers listed as relative folders in the
/// mapping file's split lists.
///
/// The reference channel for this variant is the per-point range
/// (`distance_m_1`), not the intensity.
pub struct DenseDataset {
    phase: Phase,
    return_ref: bool,
    mapping: LabelMapping,
    scan_paths: Vec<PathBuf>,
}

impl DenseDataset {
    /// Build the sample index for `phase`; split entries are folder paths
    /// joined directly under `data_path`.
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
            let dir = data_path.as_ref().join(folder.as_string());
            for path in file_paths(&dir) {
                scan_paths.push(path?);
            }
        }
        info!(folders = folders.len(), scans = scan_paths.len(), "indexed scans");

        Ok(Self {
            phase,
            return_ref,
            mapping,
            scan_paths,
        })
    }
}

impl PointCloudDataset for DenseDataset {
    fn len(&self) -> usize {
        self.scan_paths.len()
    }

    fn get(&self, index: usize) -> Result<Sample, DataError> {
        let scan_path = &self.scan_paths[index];
        let scan = read_dense_scan(scan_path)?;
        let n = scan.len();

        let labels = if self.phase == Phase::Test {
            vec![0u8; n]
        } else {
            self.mapping
                .map_all(scan.labels.iter().map(|&l| l as i32 as u32))?
        };
        debug!(scan = %scan_path.display(), points = n, "decoded scan");

        Ok(Sample {
            points: scan.points(),
            labels: Some(labels),
            reference: self.return_ref.then(|| scan.distance.clone()),
        })
    }
}
