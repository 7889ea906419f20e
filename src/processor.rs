//! Core tree copy orchestration.
//! Walks the source tree and copies every selected file either verbatim or
//! through token substitution, recording what was produced.

use crate::copy_result::{CopyRecorder, CopyResult};
use crate::error::{Error, Result};
use crate::mapping::Mapping;
use crate::path_mapper::PathMapper;
use crate::pattern::Pattern;
use crate::selection::{FileKind, SelectionPolicy};
use crate::substitution::SubstitutingReader;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Writes the text placed in front of every copied text file.
pub trait HeaderWriter {
    fn write_header(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Header writer that writes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHeader;

impl HeaderWriter for NoHeader {
    fn write_header(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

impl HeaderWriter for str {
    fn write_header(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.as_bytes())
    }
}

impl HeaderWriter for String {
    fn write_header(&self, out: &mut dyn Write) -> io::Result<()> {
        self.as_str().write_header(out)
    }
}

/// Everything one tree copy needs.
pub struct CopyJob {
    /// Directory whose files are copied
    pub source_root: PathBuf,
    /// Directory mapped destination paths are resolved against
    pub destination_root: PathBuf,
    /// Directory the recorded destination paths are relative to
    pub recording_root: PathBuf,
    pub selection: SelectionPolicy,
    pub path_mapper: Box<dyn PathMapper>,
    /// Content mappings, in the order their search terms are tried
    pub mappings: Vec<Mapping>,
    /// File name pattern for mappings without own patterns
    pub default_name_pattern: Option<Pattern>,
    pub header: Box<dyn HeaderWriter>,
}

impl CopyJob {
    /// Copies all selected files of the source tree.
    ///
    /// # Returns
    /// * `Result<CopyResult>` - Destination paths of the binary and text files
    ///
    /// # Errors
    /// * `Error::UnclassifiedFileError` for the first selected file that is
    ///   neither binary nor text; files copied before it stay in place
    /// * `Error::CopyError` / `Error::IoError` if reading or writing fails;
    ///   the partially written destination file is removed
    /// * `Error::ConfigurationError` if a mapped path leaves the destination
    ///   root or lies outside the recording root; nothing is written for it
    pub fn run(&self) -> Result<CopyResult> {
        debug!(
            "Copying '{}' to '{}'",
            self.source_root.display(),
            self.destination_root.display()
        );
        let mut recorder = CopyRecorder::default();

        for entry in WalkDir::new(&self.source_root).sort_by_file_name() {
            let entry = entry?;
            let source = entry.path();
            if !source.is_file() {
                continue;
            }
            let relative_path = source
                .strip_prefix(&self.source_root)
                .map_err(|e| Error::ConfigurationError(e.to_string()))?;

            if !self.selection.should_copy(relative_path) {
                debug!("Skipping file {}", relative_path.display());
                continue;
            }

            let mapped = confined(self.path_mapper.map(relative_path), relative_path)?;
            let destination = self.destination_root.join(mapped);
            let recorded_path = self.recorded_path(&destination)?;
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }

            let recorded = match self.selection.classify(relative_path) {
                FileKind::Binary => {
                    copy_binary_file(source, &destination)?;
                    recorder.binary(recorded_path)
                }
                FileKind::Text => {
                    self.copy_text_file(source, relative_path, &destination)?;
                    recorder.text(recorded_path)
                }
                FileKind::Unknown => {
                    return Err(Error::UnclassifiedFileError {
                        file: source.display().to_string(),
                    });
                }
            };
            if !recorded {
                warn!(
                    "Destination '{}' was written more than once, last source: {}",
                    destination.display(),
                    relative_path.display()
                );
            }
        }

        Ok(recorder.finish())
    }

    fn recorded_path<'a>(&self, destination: &'a Path) -> Result<&'a Path> {
        destination.strip_prefix(&self.recording_root).map_err(|_| {
            Error::ConfigurationError(format!(
                "destination '{}' is not inside '{}'",
                destination.display(),
                self.recording_root.display()
            ))
        })
    }

    fn copy_text_file(&self, source: &Path, relative_path: &Path, destination: &Path) -> Result<()> {
        info!("Copy text {} to {}", source.display(), destination.display());
        let mut reader = SubstitutingReader::open(
            source,
            relative_path,
            &self.mappings,
            self.default_name_pattern.as_ref(),
        )?;
        let copy_error = |e: io::Error| Error::CopyError {
            source_file: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source: e,
        };

        let file = File::create(destination).map_err(copy_error)?;
        if let Err(e) = self.write_text(&mut reader, file) {
            discard_partial(destination);
            return Err(copy_error(e));
        }
        Ok(())
    }

    fn write_text(&self, reader: &mut impl Read, file: File) -> io::Result<()> {
        let mut writer = BufWriter::new(file);
        self.header.write_header(&mut writer)?;
        io::copy(reader, &mut writer)?;
        writer.flush()
    }
}

/// Rejects mapped paths that would not stay below the destination root.
fn confined(mapped: PathBuf, relative_path: &Path) -> Result<PathBuf> {
    let nested = mapped
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !nested || mapped.file_name().is_none() {
        return Err(Error::ConfigurationError(format!(
            "'{}' is mapped to '{}', which leaves the destination directory",
            relative_path.display(),
            mapped.display()
        )));
    }
    Ok(mapped)
}

fn discard_partial(destination: &Path) {
    if let Err(e) = fs::remove_file(destination) {
        warn!("Could not remove partial file {}: {}", destination.display(), e);
    }
}

fn copy_binary_file(source: &Path, destination: &Path) -> Result<()> {
    info!("Copy binary {} to {}", source.display(), destination.display());
    fs::copy(source, destination).map(|_| ()).map_err(|e| {
        if destination.is_file() {
            discard_partial(destination);
        }
        Error::CopyError {
            source_file: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source: e,
        }
    })
}
