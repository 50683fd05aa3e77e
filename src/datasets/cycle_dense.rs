//! Weather-partitioned DENSE loader.
//!
//! Splits are keyed by a (phase, condition) pair; the mapping file stores the
//! nine legal combinations under concatenated keys (`trainclear`, `valfog`,
//! ...). Label emission is optional: the upstream pipeline used this variant
//! as an unlabeled domain-transfer source, so labels default to off.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dataset::{Condition, Phase, PointCloudDataset, Sample};
use crate::datasets::read_dense_scan;
use crate::error::DataError;
use crate::mapping::LabelMapping;
use crate::walk::file_paths;

/// Dataset over DENSE containers for one weather condition of one phase.
pub struct CycleDenseDataset {
    phase: Phase,
    emit_labels: bool,
    return_ref: bool,
    mapping: LabelMapping,
    scan_paths: Vec<PathBuf>,
}

impl CycleDenseDataset {
    /// Build the sample index for `(phase, condition)`.
    ///
    /// Both fields are typed, so only the nine legal pairs can be expressed;
    /// a mapping file missing the pair's split key still fails before any
    /// scan I/O.
    #[tracing::instrument(skip_all, fields(root = %data_path.as_ref().display(), %phase, %condition))]
    pub fn new(
        data_path: impl AsRef<Path>,
        phase: Phase,
        condition: Condition,
        label_mapping: impl AsRef<Path>,
    ) -> Result<Self, DataError> {
        let mapping = LabelMapping::from_yaml_file(label_mapping)?;
        let key = split_key(phase, condition);
        let folders = mapping.split(&key)?.to_vec();

        let mut scan_paths = Vec::new();
        for folder in &folders {
            let dir = data_path.as_ref().join(folder.as_string());
            for path in file_paths(&dir) {
                scan_paths.push(path?);
            }
        }
        info!(split = %key, scans = scan_paths.len(), "indexed scans");

        Ok(Self {
            phase,
            emit_labels: false,
            return_ref: true,
            mapping,
            scan_paths,
        })
    }

    /// Enable or disable the label channel in returned samples.
    pub fn with_labels(mut self, emit: bool) -> Self {
        self.emit_labels = emit;
        self
    }

    /// Enable or disable the reference (range) channel.
    pub fn with_reference(mut self, emit: bool) -> Self {
        self.return_ref = emit;
        self
    }
}

/// Split-table key for a (phase, condition) pair.
fn split_key(phase: Phase, condition: Condition) -> String {
    format!("{}{}", phase.as_str(), condition.as_str())
}

impl PointCloudDataset for CycleDenseDataset {
    fn len(&self) -> usize {
        self.scan_paths.len()
    }

    fn get(&self, index: usize) -> Result<Sample, DataError> {
        let scan_path = &self.scan_paths[index];
        let scan = read_dense_scan(scan_path)?;
        let n = scan.len();

        let labels = if self.emit_labels {
            if self.phase == Phase::Test {
                Some(vec![0u8; n])
            } else {
                Some(
                    self.mapping
                        .map_all(scan.labels.iter().map(|&l| l as i32 as u32))?,
                )
            }
        } else {
            None
        };
        debug!(scan = %scan_path.display(), points = n, "decoded scan");

        Ok(Sample {
            points: scan.points(),
            labels,
            reference: self.return_ref.then(|| scan.distance.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keys_cover_the_nine_pairs() {
        let phases = [Phase::Train, Phase::Val, Phase::Test];
        let conditions = [Condition::Clear, Condition::Rain, Condition::Fog];
        let keys: Vec<String> = phases
            .iter()
            .flat_map(|&p| conditions.iter().map(move |&c| split_key(p, c)))
            .collect();
        assert_eq!(keys.len(), 9);
        assert!(keys.contains(&"trainclear".to_string()));
        assert!(keys.contains(&"valfog".to_string()));
        assert!(keys.contains(&"testrain".to_string()));
    }
}
