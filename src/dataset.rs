//! Shared dataset contract: sample type, access trait, and split keys.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::error::DataError;

/// One LiDAR scan as returned by an indexed dataset access.
///
/// All present channels share the same leading dimension N (the number of
/// points in the scan). N varies per sample and is only known once the
/// backing file has been read.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Point coordinates, one `Vec3` per point.
    pub points: Vec<Vec3>,
    /// Per-point training labels. `None` only for variants configured to
    /// skip label emission.
    pub labels: Option<Vec<u8>>,
    /// Raw reference channel (reflectance or range), present when the
    /// dataset was built with `return_ref`.
    pub reference: Option<Vec<f32>>,
}

impl Sample {
    /// Number of points in the scan.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the scan holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// An indexed collection of LiDAR scans.
///
/// Implementations are `Send + Sync` so immutable dataset objects can be
/// shared across parallel data-loading workers. `get` re-reads from storage
/// on every call; nothing is cached between accesses.
pub trait PointCloudDataset: Send + Sync {
    /// Total number of scans in this split.
    fn len(&self) -> usize;

    /// Whether the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read, decode, and remap the scan at `index`.
    ///
    /// # Panics
    /// May panic if `index >= self.len()`.
    fn get(&self, index: usize) -> Result<Sample, DataError>;
}

/// Which phase of a dataset to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Train,
    Val,
    Test,
}

impl Phase {
    /// Short name, as used in split-key concatenation.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Train => "train",
            Phase::Val => "val",
            Phase::Test => "test",
        }
    }

    /// Key under the label-mapping `split` table. The validation split is
    /// stored as `valid` in SemanticKITTI-style mapping files.
    pub fn split_key(self) -> &'static str {
        match self {
            Phase::Train => "train",
            Phase::Val => "valid",
            Phase::Test => "test",
        }
    }
}

impl FromStr for Phase {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, DataError> {
        match s {
            "train" => Ok(Phase::Train),
            "val" => Ok(Phase::Val),
            "test" => Ok(Phase::Test),
            other => Err(DataError::InvalidPhase(other.to_string())),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather condition partition for the class-partitioned dense variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Rain,
    Fog,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Clear => "clear",
            Condition::Rain => "rain",
            Condition::Fog => "fog",
        }
    }
}

impl FromStr for Condition {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, DataError> {
        match s {
            "clear" => Ok(Condition::Clear),
            "rain" => Ok(Condition::Rain),
            "fog" => Ok(Condition::Fog),
            other => Err(DataError::InvalidCondition(other.to_string())),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_parses_canonical_names() {
        assert_eq!("train".parse::<Phase>().unwrap(), Phase::Train);
        assert_eq!("val".parse::<Phase>().unwrap(), Phase::Val);
        assert_eq!("test".parse::<Phase>().unwrap(), Phase::Test);
    }

    #[test]
    fn phase_rejects_unknown_names() {
        let err = "bogus".parse::<Phase>().unwrap_err();
        assert!(matches!(err, DataError::InvalidPhase(_)));
        assert!(err.to_string().contains("train/val/test"));
    }

    #[test]
    fn val_phase_uses_valid_split_key() {
        assert_eq!(Phase::Val.split_key(), "valid");
        assert_eq!(Phase::Val.as_str(), "val");
    }

    #[test]
    fn condition_parses_and_rejects() {
        assert_eq!("fog".parse::<Condition>().unwrap(), Condition::Fog);
        assert!(matches!(
            "snow".parse::<Condition>(),
            Err(DataError::InvalidCondition(_))
        ));
    }
}
