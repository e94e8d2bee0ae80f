//! Sink interface

use wenu_core::{Error, Result};

/// Line-oriented output sink
///
/// A sink is opened by its constructor, receives lines in order and is closed
/// exactly once. Writing after `close` is an error.
pub trait RecordSink {
    /// Append one line; the sink adds the line terminator
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Flush and release the sink
    fn close(&mut self) -> Result<()>;
}

/// Sink that keeps lines in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Contents as they would appear in a file
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl RecordSink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        if self.closed {
            return Err(Error::sink("write after close"));
        }
        self.lines.push(line.to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
