//! Rewriting of source paths into destination paths.

use crate::mapping::Mapping;
use crate::pattern::{file_name, slash_path};
use log::info;
use std::path::{Path, PathBuf};

/// Maps a relative source path to a relative destination path.
pub trait PathMapper {
    fn map(&self, path: &Path) -> PathBuf;
}

impl<F> PathMapper for F
where
    F: Fn(&Path) -> PathBuf,
{
    fn map(&self, path: &Path) -> PathBuf {
        self(path)
    }
}

/// Replaces the search terms of all applicable mappings in the
/// slash-normalized path.
///
/// Matching is purely textual on the whole path. A mapping like `b/c` only
/// replaces complete segments if its search term is written that way; no
/// boundaries are inserted.
#[derive(Debug, Clone, Default)]
pub struct SegmentPathMapper {
    mappings: Vec<Mapping>,
}

impl SegmentPathMapper {
    pub fn new(mappings: Vec<Mapping>) -> Self {
        Self { mappings }
    }
}

impl PathMapper for SegmentPathMapper {
    fn map(&self, path: &Path) -> PathBuf {
        let pairs: Vec<(&str, &str)> = self
            .mappings
            .iter()
            .filter(|mapping| mapping.applies(None, path))
            .map(|mapping| (mapping.search(), mapping.replace()))
            .collect();
        PathBuf::from(replace_each(&slash_path(path), &pairs))
    }
}

/// Prefixes destination file names starting with a dot with `_`.
///
/// Archetype packaging drops resource files with a leading dot, so they are
/// shipped under a masked name. Directory names are left alone.
#[derive(Debug, Clone)]
pub struct DotFileMasking<M> {
    inner: M,
}

impl<M: PathMapper> DotFileMasking<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: PathMapper> PathMapper for DotFileMasking<M> {
    fn map(&self, path: &Path) -> PathBuf {
        let mapped = self.inner.map(path);
        let name = file_name(&mapped);
        if !name.starts_with('.') {
            return mapped;
        }
        info!("Masking leading dot of: {}", mapped.display());
        mapped.with_file_name(format!("_{name}"))
    }
}

/// Replaces every search term in a single left-to-right pass.
///
/// At each step the leftmost occurrence of any search term is replaced; when
/// several terms start at the same position the first one in `pairs` wins.
/// Replaced text is never scanned again.
pub fn replace_each(text: &str, pairs: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let next = pairs
            .iter()
            .filter(|(search, _)| !search.is_empty())
            .filter_map(|&(search, replace)| rest.find(search).map(|at| (at, search, replace)))
            .min_by_key(|&(at, _, _)| at);
        match next {
            Some((at, search, replace)) => {
                result.push_str(&rest[..at]);
                result.push_str(replace);
                rest = &rest[at + search.len()..];
            }
            None => {
                result.push_str(rest);
                return result;
            }
        }
    }
}
