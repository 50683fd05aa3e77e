//! Name-to-dataset-kind registry.
//!
//! The registry is an explicit value constructed once at startup and read-only
//! afterward; there is no process-global state. Call sites resolve a config
//! string to a [`DatasetKind`] and dispatch on the enum.

use std::collections::BTreeMap;

use crate::error::DataError;

/// The fixed set of built-in dataset variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// Flat binary scans with companion label files (SemanticKITTI layout).
    SemanticKitti,
    /// HDF5 containers with six named channels (DENSE layout).
    Dense,
    /// DENSE containers partitioned by weather condition.
    CycleDense,
    /// Pickled-index datasets resolved through a sensor catalog (nuScenes).
    Nuscenes,
}

/// A mapping from dataset name to a registered value.
///
/// Generic so tests and downstream code can register constructors, kinds, or
/// anything else; duplicate names and unknown lookups both fail loudly.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert `name -> value`. Fails if the name is already taken.
    pub fn register(&mut self, name: impl Into<String>, value: T) -> Result<(), DataError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(DataError::DuplicateDataset(name));
        }
        self.entries.insert(name, value);
        Ok(())
    }

    /// Look up a registered value. The error message lists every known name.
    pub fn resolve(&self, name: &str) -> Result<&T, DataError> {
        self.entries
            .get(name)
            .ok_or_else(|| DataError::UnknownDataset {
                name: name.to_string(),
                known: self.names().map(str::to_string).collect(),
            })
    }

    /// Iterate over registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry<DatasetKind> {
    /// Registry pre-populated with the built-in variants under the names
    /// used by existing training configs.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        // Infallible: the set below has no duplicates.
        let _ = registry.register("SemKITTI_sk", DatasetKind::SemanticKitti);
        let _ = registry.register("Dense", DatasetKind::Dense);
        let _ = registry.register("CycleDense", DatasetKind::CycleDense);
        let _ = registry.register("SemKITTI_nusc", DatasetKind::Nuscenes);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_resolve_roundtrips() {
        let mut registry = Registry::new();
        registry.register("n", DatasetKind::Dense).unwrap();
        assert_eq!(*registry.resolve("n").unwrap(), DatasetKind::Dense);
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = Registry::new();
        registry.register("n", DatasetKind::Dense).unwrap();
        let err = registry.register("n", DatasetKind::Nuscenes).unwrap_err();
        assert!(matches!(err, DataError::DuplicateDataset(ref name) if name == "n"));
    }

    #[test]
    fn unknown_name_lists_registered_names() {
        let registry = Registry::builtin();
        let err = registry.resolve("nope").unwrap_err();
        match err {
            DataError::UnknownDataset { name, known } => {
                assert_eq!(name, "nope");
                assert!(known.contains(&"Dense".to_string()));
                assert!(known.contains(&"SemKITTI_sk".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn builtin_covers_all_variants() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            *registry.resolve("SemKITTI_nusc").unwrap(),
            DatasetKind::Nuscenes
        );
        assert_eq!(
            *registry.resolve("CycleDense").unwrap(),
            DatasetKind::CycleDense
        );
    }
}
