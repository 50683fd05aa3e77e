//! Label-mapping configuration loaded from YAML.
//!
//! A mapping file carries the `learning_map` (raw sensor label id to training
//! label id), the named `split` lists, and optional display-name tables
//! (`labels` keyed by raw id, `labels_16` keyed by training id).

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::DataError;

/// Training label reserved for points excluded from the loss.
pub const IGNORE_LABEL: u8 = 255;

/// Raw labels pack an instance id into the high 16 bits; only the low 16
/// bits identify the semantic class.
const SEMANTIC_MASK: u32 = 0xFFFF;

/// One entry of a split list: either a numeric sequence id or a relative
/// path, depending on dataset convention.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SplitEntry {
    Seq(u64),
    Name(String),
}

impl SplitEntry {
    /// The entry rendered as the string used for path construction.
    pub fn as_string(&self) -> String {
        match self {
            SplitEntry::Seq(n) => n.to_string(),
            SplitEntry::Name(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MappingDoc {
    learning_map: BTreeMap<u32, u8>,
    #[serde(default)]
    split: BTreeMap<String, Vec<SplitEntry>>,
    #[serde(default)]
    labels: BTreeMap<u32, String>,
    #[serde(default)]
    labels_16: BTreeMap<u8, String>,
}

/// Immutable raw-to-training label mapping plus split lists.
#[derive(Debug)]
pub struct LabelMapping {
    doc: MappingDoc,
}

impl LabelMapping {
    /// Parse a label-mapping YAML file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let file = File::open(path.as_ref())?;
        let doc: MappingDoc = serde_yaml::from_reader(file)?;
        debug!(
            classes = doc.learning_map.len(),
            splits = doc.split.len(),
            "loaded label mapping"
        );
        Ok(Self { doc })
    }

    /// Map a raw label to its training label.
    ///
    /// The raw value is masked to its low 16 bits first. A masked id absent
    /// from the learning map is a hard error; there is no fallback class.
    pub fn map(&self, raw: u32) -> Result<u8, DataError> {
        let semantic = raw & SEMANTIC_MASK;
        self.doc
            .learning_map
            .get(&semantic)
            .copied()
            .ok_or(DataError::UnmappedLabel(semantic))
    }

    /// Bulk form of [`map`](Self::map); fails on the first unmapped id.
    pub fn map_all(&self, raw: impl IntoIterator<Item = u32>) -> Result<Vec<u8>, DataError> {
        raw.into_iter().map(|r| self.map(r)).collect()
    }

    /// The ordered identifier list for a named split, verbatim from the file.
    pub fn split(&self, name: &str) -> Result<&[SplitEntry], DataError> {
        self.doc
            .split
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::MissingSplit(name.to_string()))
    }

    /// Training-id to display-name table, names taken from the raw-id keyed
    /// `labels` table.
    ///
    /// Raw ids are visited in descending order so that when several raw ids
    /// share a training id, the lowest raw id provides the name.
    pub fn label_names(&self) -> Result<BTreeMap<u8, String>, DataError> {
        let mut names = BTreeMap::new();
        for (&raw, &mapped) in self.doc.learning_map.iter().rev() {
            let name = self
                .doc
                .labels
                .get(&raw)
                .ok_or(DataError::MissingLabelName(raw))?;
            names.insert(mapped, name.clone());
        }
        Ok(names)
    }

    /// Training-id to display-name table for files that name the reduced
    /// label space directly (`labels_16`, keyed by training id).
    pub fn label_names_16(&self) -> Result<BTreeMap<u8, String>, DataError> {
        let mut names = BTreeMap::new();
        for &mapped in self.doc.learning_map.values().rev() {
            let name = self
                .doc
                .labels_16
                .get(&mapped)
                .ok_or(DataError::MissingLabelName(u32::from(mapped)))?;
            names.insert(mapped, name.clone());
        }
        Ok(names)
    }
}

/// Compact a label array into train format: label 0 becomes the ignore
/// sentinel, every other label shifts down by one so valid classes are
/// contiguous from 0.
pub fn to_train_labels(labels: &[u8]) -> Vec<u8> {
    labels
        .iter()
        .map(|&l| if l == 0 { IGNORE_LABEL } else { l - 1 })
        .collect()
}

/// Apply [`to_train_labels`] to each array in an ordered sequence.
pub fn to_train_labels_seq(labels: &[Vec<u8>]) -> Vec<Vec<u8>> {
    labels.iter().map(|l| to_train_labels(l)).collect()
}
