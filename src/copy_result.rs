//! The files produced by a tree copy.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Destination files of a run, relative to the recording root.
///
/// Both lists are sorted and contain each path once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyResult {
    binary_files: Vec<PathBuf>,
    text_files: Vec<PathBuf>,
}

impl CopyResult {
    pub fn binary_files(&self) -> &[PathBuf] {
        &self.binary_files
    }

    pub fn text_files(&self) -> &[PathBuf] {
        &self.text_files
    }

    pub fn is_empty(&self) -> bool {
        self.binary_files.is_empty() && self.text_files.is_empty()
    }

    /// Number of files produced.
    pub fn len(&self) -> usize {
        self.binary_files.len() + self.text_files.len()
    }
}

/// Accumulates destination paths while a tree is copied.
#[derive(Debug, Default)]
pub(crate) struct CopyRecorder {
    binary_files: BTreeSet<PathBuf>,
    text_files: BTreeSet<PathBuf>,
}

impl CopyRecorder {
    /// Records a binary file. Returns false if the path was already recorded.
    pub(crate) fn binary(&mut self, path: &Path) -> bool {
        if self.text_files.contains(path) {
            return false;
        }
        self.binary_files.insert(path.to_path_buf())
    }

    /// Records a text file. Returns false if the path was already recorded.
    pub(crate) fn text(&mut self, path: &Path) -> bool {
        if self.binary_files.contains(path) {
            return false;
        }
        self.text_files.insert(path.to_path_buf())
    }

    pub(crate) fn finish(self) -> CopyResult {
        CopyResult {
            binary_files: self.binary_files.into_iter().collect(),
            text_files: self.text_files.into_iter().collect(),
        }
    }
}
