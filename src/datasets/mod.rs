//! Built-in dataset variants.
//!
//! Four loaders over three raw storage conventions:
//! - [`SemanticKittiDataset`] — flat binary scans plus companion label files
//! - [`DenseDataset`] — HDF5 containers with six named channels
//! - [`CycleDenseDataset`] — DENSE containers partitioned by weather condition
//! - [`NuscenesDataset`] — pickled scan index resolved through a sensor catalog

pub mod cycle_dense;
pub mod dense;
pub mod nuscenes;
pub mod semantic_kitti;

pub use cycle_dense::CycleDenseDataset;
pub use dense::DenseDataset;
pub use nuscenes::{NuscenesDataset, ScanInfo, SensorCatalog};
pub use semantic_kitti::SemanticKittiDataset;

use std::fs;
use std::path::Path;

use glam::Vec3;

use crate::error::DataError;

/// Read a flat little-endian f32 blob laid out as rows of `cols` values.
pub(crate) fn read_f32_rows(path: &Path, cols: usize) -> Result<Vec<f32>, DataError> {
    let bytes = fs::read(path)?;
    if bytes.len() % (4 * cols) != 0 {
        return Err(DataError::MalformedScan {
            path: path.to_path_buf(),
            len: bytes.len(),
            cols,
        });
    }
    Ok(bytemuck::pod_collect_to_vec(&bytes))
}

/// Read a flat little-endian i32 blob, one value per point.
pub(crate) fn read_i32_blob(path: &Path) -> Result<Vec<i32>, DataError> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(DataError::MalformedScan {
            path: path.to_path_buf(),
            len: bytes.len(),
            cols: 1,
        });
    }
    Ok(bytemuck::pod_collect_to_vec(&bytes))
}

/// Gather xyz columns out of a row-major scan buffer.
pub(crate) fn points_from_rows(rows: &[f32], cols: usize) -> Vec<Vec3> {
    rows.chunks_exact(cols)
        .map(|row| Vec3::new(row[0], row[1], row[2]))
        .collect()
}

/// Gather a single column out of a row-major scan buffer.
pub(crate) fn column_from_rows(rows: &[f32], cols: usize, col: usize) -> Vec<f32> {
    rows.chunks_exact(cols).map(|row| row[col]).collect()
}

/// The six channels of a DENSE HDF5 scan, flattened to a common length.
pub(crate) struct DenseScan {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub distance: Vec<f32>,
    #[allow(dead_code)]
    pub intensity: Vec<f32>,
    pub labels: Vec<f32>,
}

impl DenseScan {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn points(&self) -> Vec<Vec3> {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| Vec3::new(x, y, z))
            .collect()
    }
}

/// Open a DENSE container and read all six channels.
///
/// The file handle is dropped (and closed) on every exit path, including
/// decode failures.
pub(crate) fn read_dense_scan(path: &Path) -> Result<DenseScan, DataError> {
    let file = hdf5::File::open(path)?;
    let x = file.dataset("sensorX_1")?.read_raw::<f32>()?;
    let expected = x.len();
    let channel = |name: &'static str| -> Result<Vec<f32>, DataError> {
        let values = file.dataset(name)?.read_raw::<f32>()?;
        if values.len() != expected {
            return Err(DataError::ChannelLengthMismatch {
                path: path.to_path_buf(),
                channel: name,
                len: values.len(),
                expected,
            });
        }
        Ok(values)
    };
    Ok(DenseScan {
        x,
        y: channel("sensorY_1")?,
        z: channel("sensorZ_1")?,
        distance: channel("distance_m_1")?,
        intensity: channel("intensity_1")?,
        labels: channel("labels_1")?,
    })
}
