//! Line source: a lazy, forward-only sequence of input lines.
//!
//! Lines are pulled one at a time through a buffered reader, so the whole
//! file is never held in memory.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::PopError;

/// One raw input line with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Iterator over the lines of a reader.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD so a single bad
/// row never stops the run. Yields `Err` at most once: after a read error
/// the source is exhausted.
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    path: PathBuf,
    number: usize,
    failed: bool,
}

impl LineSource<BufReader<File>> {
    /// Open `path` for streaming. Fails if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PopError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PopError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file), path))
    }
}

impl<R: BufRead> LineSource<R> {
    /// Wrap an already-open reader. `path` is only used in diagnostics.
    pub fn from_reader(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            path: path.into(),
            number: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<Line, PopError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.number += 1;
                let bytes = strip_line_ending(&self.buf);
                let text = match String::from_utf8_lossy(bytes) {
                    Cow::Borrowed(text) => text.to_string(),
                    Cow::Owned(text) => {
                        warn!(line = self.number, "invalid UTF-8 replaced");
                        text
                    }
                };
                Some(Ok(Line::new(self.number, text)))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(PopError::Io {
                    path: self.path.clone(),
                    source,
                }))
            }
        }
    }
}

fn strip_line_ending(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}
