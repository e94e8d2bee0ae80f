//! CSV record output
//!
//! One header line, then one comma-separated line per accepted event.
//! Numbers use their default `Display` form.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use wenu_core::{Error, Result, SelectionRecord};

use crate::sink::RecordSink;

/// Column header written before any record
pub const HEADER: &str =
    "Run,Event,pt,eta,phi,Q,type,delEta,delPhi,sigmaEtaEta,HoverE,isoTrack,isoEcal,isoHcal,MET,phiMET";

/// Render a record as one CSV line, without terminator
pub fn format_record(record: &SelectionRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        record.run,
        record.event,
        record.pt,
        record.eta,
        record.phi,
        record.charge,
        record.region_tag,
        record.del_eta,
        record.del_phi,
        record.sigma_eta_eta,
        record.hcal_over_ecal,
        record.iso_track,
        record.iso_ecal,
        record.iso_hcal,
        record.met,
        record.met_phi,
    )
}

/// Write the column header
pub fn write_header<S: RecordSink + ?Sized>(sink: &mut S) -> Result<()> {
    sink.write_line(HEADER)
}

/// Write one record
pub fn write_record<S: RecordSink + ?Sized>(sink: &mut S, record: &SelectionRecord) -> Result<()> {
    sink.write_line(&format_record(record))
}

/// Buffered CSV file sink
///
/// The file is created (truncated) on construction. Dropping an unclosed sink
/// flushes it.
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    lines_written: u64,
}

impl CsvSink {
    /// Create the output file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)
            .map_err(|e| Error::sink(format!("cannot open {:?}: {}", path, e)))?;

        info!("Writing records to {:?}", path);

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            lines_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines written so far, header included
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

impl RecordSink for CsvSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| Error::sink(format!("{:?} is already closed", self.path)))?;

        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            debug!("Closed {:?} after {} lines", self.path, self.lines_written);
        }
        Ok(())
    }
}

impl Drop for CsvSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                warn!("Failed to flush {:?}: {}", self.path, e);
            }
        }
    }
}
