//! Streaming token substitution for text files.
//!
//! [`SubstitutingReader`] replaces literal search terms while reading. It
//! never holds more than one lookahead window: the window is as long as the
//! longest search term, so every possible match is completely visible before
//! deciding to replace or to emit a single byte unchanged. Search terms are
//! tried in configured order and the first one that starts the window wins,
//! regardless of length.
//!
//! Matching works on the encoded bytes. A UTF-8 search term can only match
//! at a character boundary of UTF-8 text, and bytes of text in any other
//! encoding are copied unchanged.

use crate::error::{Error, Result};
use crate::mapping::Mapping;
use crate::pattern::Pattern;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// The search/replace pairs active for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    rules: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Substitution {
    /// Creates a substitution from literal pairs, keeping their order.
    ///
    /// Pairs with an empty search term are dropped.
    pub fn new<S, T>(pairs: impl IntoIterator<Item = (S, T)>) -> Self
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let rules = pairs
            .into_iter()
            .filter_map(|(search, replace)| {
                let search = search.as_ref().as_bytes().to_vec();
                (!search.is_empty()).then(|| (search, replace.as_ref().as_bytes().to_vec()))
            })
            .collect();
        Self { rules }
    }

    /// Keeps the mappings that apply to `path`, in their configured order.
    pub fn for_file(mappings: &[Mapping], default_name_pattern: Option<&Pattern>, path: &Path) -> Self {
        Self::new(
            mappings
                .iter()
                .filter(|mapping| mapping.applies(default_name_pattern, path))
                .map(|mapping| (mapping.search(), mapping.replace())),
        )
    }

    /// Returns true when no search term is active.
    pub fn is_passthrough(&self) -> bool {
        self.rules.is_empty()
    }

    /// Length in bytes of the longest search term.
    pub fn window(&self) -> usize {
        self.rules.iter().map(|(search, _)| search.len()).max().unwrap_or(0)
    }

    /// Wraps `source` in a reader that applies this substitution.
    pub fn reader<R: BufRead>(self, source: R) -> SubstitutingReader<R> {
        let window = self.window();
        SubstitutingReader {
            source: PushbackReader::new(source, window + 1),
            rules: self.rules,
            window: Vec::with_capacity(window),
            width: window,
            pending: Vec::new(),
            pos: 0,
        }
    }
}

/// A reader that substitutes tokens of the underlying text.
///
/// Without active search terms the source is passed through unchanged.
pub struct SubstitutingReader<R> {
    source: PushbackReader<R>,
    rules: Vec<(Vec<u8>, Vec<u8>)>,
    window: Vec<u8>,
    width: usize,
    // Output of the last decision, emitted from `pos`.
    pending: Vec<u8>,
    pos: usize,
}

impl SubstitutingReader<BufReader<File>> {
    /// Opens `file` with the mappings that apply to it.
    ///
    /// `relative_path` is what the mapping patterns are tested against.
    ///
    /// # Errors
    /// * `Error::FileNotFound` if `file` does not exist
    /// * `Error::IoError` if it cannot be opened
    pub fn open(
        file: &Path,
        relative_path: &Path,
        mappings: &[Mapping],
        default_name_pattern: Option<&Pattern>,
    ) -> Result<Self> {
        let substitution = Substitution::for_file(mappings, default_name_pattern, relative_path);
        debug!(
            "{} of {} mappings apply to {}",
            substitution.rules.len(),
            mappings.len(),
            relative_path.display()
        );
        let source = File::open(file).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound { file: file.display().to_string() },
            _ => Error::IoError(e),
        })?;
        Ok(substitution.reader(BufReader::new(source)))
    }
}

impl<R: BufRead> SubstitutingReader<R> {
    /// Decides on the next window: a replacement or the first byte as is.
    ///
    /// Returns false at end of input.
    fn advance(&mut self) -> io::Result<bool> {
        self.source.read_window(&mut self.window, self.width)?;
        let Some(&first) = self.window.first() else {
            return Ok(false);
        };

        self.pending.clear();
        self.pos = 0;
        match self.rules.iter().find(|(search, _)| self.window.starts_with(search)) {
            Some((search, replace)) => {
                self.source.unread(&self.window[search.len()..])?;
                self.pending.extend_from_slice(replace);
            }
            None => {
                self.source.unread(&self.window[1..])?;
                self.pending.push(first);
            }
        }
        Ok(true)
    }
}

impl<R: BufRead> Read for SubstitutingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.rules.is_empty() {
            return self.source.inner.read(buf);
        }

        let mut written = 0;
        while written < buf.len() {
            if self.pos < self.pending.len() {
                let n = (self.pending.len() - self.pos).min(buf.len() - written);
                buf[written..written + n].copy_from_slice(&self.pending[self.pos..self.pos + n]);
                self.pos += n;
                written += n;
                continue;
            }
            if !self.advance()? {
                break;
            }
        }
        Ok(written)
    }
}

/// Byte source with a bounded pushback buffer.
struct PushbackReader<R> {
    inner: R,
    // Next byte to read is at the end.
    pushed: Vec<u8>,
    capacity: usize,
}

impl<R: BufRead> PushbackReader<R> {
    fn new(inner: R, capacity: usize) -> Self {
        Self { inner, pushed: Vec::with_capacity(capacity), capacity }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushed.pop() {
            return Ok(Some(byte));
        }
        loop {
            let byte = match self.inner.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if byte.is_some() {
                self.inner.consume(1);
            }
            return Ok(byte);
        }
    }

    /// Fills `window` with up to `len` bytes; fewer at end of input.
    fn read_window(&mut self, window: &mut Vec<u8>, len: usize) -> io::Result<()> {
        window.clear();
        while window.len() < len {
            match self.read_byte()? {
                Some(byte) => window.push(byte),
                None => break,
            }
        }
        Ok(())
    }

    /// Pushes `bytes` back so that `bytes[0]` is read next.
    fn unread(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.pushed.len() + bytes.len() > self.capacity {
            return Err(io::Error::other("pushback buffer overflow"));
        }
        self.pushed.extend(bytes.iter().rev());
        Ok(())
    }
}
