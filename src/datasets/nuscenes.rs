//! nuScenes loader: pickled scan index plus a sensor-catalog collaborator.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::dataset::{PointCloudDataset, Sample};
use crate::datasets::{column_from_rows, points_from_rows, read_f32_rows};
use crate::error::DataError;
use crate::mapping::LabelMapping;

/// Columns per scan row: xyz, reflectance, ring index.
const SCAN_COLS: usize = 5;

/// Leading path fragment baked into `lidar_path` entries by the index
/// builder; stripped before joining under the data root.
const LIDAR_PATH_PREFIX_LEN: usize = 16;

/// One record of the pickled scan index.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanInfo {
    pub lidar_path: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct IndexDoc {
    infos: Vec<ScanInfo>,
}

/// External metadata service resolving sample tokens to sensor records.
///
/// Records are loosely-typed JSON-style property maps; the dataset follows
/// `get("sample", token)["data"]["LIDAR_TOP"]` and then
/// `get("lidarseg", sd_token)["filename"]` to find per-point label files.
pub trait SensorCatalog: Send + Sync {
    /// Look up the record for `token` in the named table.
    fn get(&self, table: &str, token: &str) -> Result<JsonValue, DataError>;

    /// Root under which catalog-relative filenames are resolved.
    fn dataroot(&self) -> &Path;
}

/// Dataset driven by a pre-built pickled index instead of a YAML split.
pub struct NuscenesDataset<C: SensorCatalog> {
    data_path: PathBuf,
    return_ref: bool,
    mapping: LabelMapping,
    infos: Vec<ScanInfo>,
    catalog: C,
}

impl<C: SensorCatalog> NuscenesDataset<C> {
    /// Load the pickled index at `index_path` and the label mapping.
    #[tracing::instrument(skip_all, fields(index = %index_path.as_ref().display()))]
    pub fn new(
        data_path: impl AsRef<Path>,
        index_path: impl AsRef<Path>,
        label_mapping: impl AsRef<Path>,
        catalog: C,
        return_ref: bool,
    ) -> Result<Self, DataError> {
        let file = File::open(index_path.as_ref())?;
        let doc: IndexDoc = serde_pickle::from_reader(file, serde_pickle::DeOptions::new())?;
        let mapping = LabelMapping::from_yaml_file(label_mapping)?;
        info!(scans = doc.infos.len(), "loaded scan index");

        Ok(Self {
            data_path: data_path.as_ref().to_path_buf(),
            return_ref,
            mapping,
            infos: doc.infos,
            catalog,
        })
    }

    fn field<'a>(
        record: &'a JsonValue,
        table: &str,
        token: &str,
        field: &str,
    ) -> Result<&'a str, DataError> {
        record[field].as_str().ok_or_else(|| DataError::CatalogField {
            table: table.to_string(),
            token: token.to_string(),
            field: field.to_string(),
        })
    }

    /// Resolve the per-point label file for one scan through the catalog.
    fn label_path(&self, info: &ScanInfo) -> Result<PathBuf, DataError> {
        let sample = self.catalog.get("sample", &info.token)?;
        let sd_token = sample["data"]["LIDAR_TOP"]
            .as_str()
            .ok_or_else(|| DataError::CatalogField {
                table: "sample".to_string(),
                token: info.token.clone(),
                field: "data.LIDAR_TOP".to_string(),
            })?;
        let lidarseg = self.catalog.get("lidarseg", sd_token)?;
        let filename = Self::field(&lidarseg, "lidarseg", sd_token, "filename")?;
        Ok(self.catalog.dataroot().join(filename))
    }
}

impl<C: SensorCatalog> PointCloudDataset for NuscenesDataset<C> {
    fn len(&self) -> usize {
        self.infos.len()
    }

    fn get(&self, index: usize) -> Result<Sample, DataError> {
        let info = &self.infos[index];

        let label_path = self.label_path(info)?;
        let raw_labels = fs::read(&label_path)?;

        let lidar_rel = info.lidar_path.get(LIDAR_PATH_PREFIX_LEN..).unwrap_or("");
        let scan_path = self.data_path.join(lidar_rel);
        let rows = read_f32_rows(&scan_path, SCAN_COLS)?;
        let n = rows.len() / SCAN_COLS;

        if raw_labels.len() != n {
            return Err(DataError::LabelCountMismatch {
                path: label_path,
                points: n,
                labels: raw_labels.len(),
            });
        }
        let labels = self
            .mapping
            .map_all(raw_labels.into_iter().map(u32::from))?;
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
