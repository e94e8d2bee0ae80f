//! JSON-lines event source
//!
//! Reads events from one or more files, in order, one JSON object per line.
//! Blank lines are ignored. A line that does not parse as an event is skipped
//! with a warning; failing to open or read a file ends the run.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::event::{Event, EventSource};
use crate::{Error, Result};

/// Event source over a list of JSON-lines files
#[derive(Debug)]
pub struct JsonLinesSource {
    pending: VecDeque<PathBuf>,
    current: Option<OpenFile>,
    skipped_lines: usize,
}

#[derive(Debug)]
struct OpenFile {
    path: PathBuf,
    reader: BufReader<File>,
    line_no: usize,
}

impl JsonLinesSource {
    /// Create a source over the given files; nothing is opened until the
    /// first event is requested
    pub fn new<P: AsRef<Path>>(files: impl IntoIterator<Item = P>) -> Self {
        Self {
            pending: files.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            current: None,
            skipped_lines: 0,
        }
    }

    /// Number of malformed lines skipped so far
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    fn open_next(&mut self) -> Result<bool> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(false);
        };

        let file = File::open(&path)
            .map_err(|e| Error::input(format!("cannot open {:?}: {}", path, e)))?;
        info!("Reading events from {:?}", path);

        self.current = Some(OpenFile {
            path,
            reader: BufReader::new(file),
            line_no: 0,
        });
        Ok(true)
    }
}

impl EventSource for JsonLinesSource {
    fn next_event(&mut self) -> Result<Option<Event>> {
        let mut line = Vec::new();

        loop {
            if self.current.is_none() && !self.open_next()? {
                return Ok(None);
            }

            let Some(file) = self.current.as_mut() else {
                continue;
            };

            line.clear();
            if file.reader.read_until(b'\n', &mut line)? == 0 {
                debug!("Finished {:?} after {} lines", file.path, file.line_no);
                self.current = None;
                continue;
            }
            file.line_no += 1;

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            // invalid UTF-8 surfaces here as a parse error
            match serde_json::from_slice::<Event>(&line) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => {
                    warn!("Skipping malformed event at {:?}:{}: {}", file.path, file.line_no, e);
                    self.skipped_lines += 1;
                }
            }
        }
    }
}
