//! Recursive file enumeration.

use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

/// Lazily enumerate every file under `root`, recursing into subdirectories.
///
/// Traversal order is whatever the filesystem yields; it is finite and
/// single-pass. Call again to re-enumerate.
pub fn file_paths(root: impl AsRef<Path>) -> FilePaths {
    FilePaths {
        pending: vec![root.as_ref().to_path_buf()],
        current: None,
    }
}

/// Iterator returned by [`file_paths`].
#[derive(Debug)]
pub struct FilePaths {
    pending: Vec<PathBuf>,
    current: Option<ReadDir>,
}

impl Iterator for FilePaths {
    type Item = io::Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(read_dir) = self.current.as_mut() {
                match read_dir.next() {
                    Some(Ok(entry)) => {
                        let path = entry.path();
                        match entry.file_type() {
                            Ok(ft) if ft.is_dir() => self.pending.push(path),
                            Ok(_) => return Some(Ok(path)),
                            Err(e) => return Some(Err(e)),
                        }
                    }
                    Some(Err(e)) => return Some(Err(e)),
                    None => self.current = None,
                }
            } else {
                let dir = self.pending.pop()?;
                match fs::read_dir(&dir) {
                    Ok(read_dir) => self.current = Some(read_dir),
                    Err(e) => return Some(Err(e)),
                }
            }
        }
    }
}
