//! Selection pipeline
//!
//! Drives the [`EventSelector`] over an event stream, one event at a time,
//! and writes accepted records to a [`RecordSink`]. The sink is primed with
//! the CSV header before the first event and closed when the run ends, on
//! success or failure.

use tracing::{debug, info, warn};
use wenu_core::{Event, EventSource, InputTag, LumiMask, Result};
use wenu_output::{write_header, write_record, RecordSink};

use crate::selector::{Decision, EventSelector, SelectorConfig};

/// Everything the pipeline needs to run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Label of the electron collection
    pub electron_tag: InputTag,

    /// Label of the MET collection
    pub met_tag: InputTag,

    pub selector: SelectorConfig,

    /// Stop after this many (mask-accepted) events
    pub max_events: Option<u64>,

    /// Only process certified lumi sections
    pub lumi_mask: Option<LumiMask>,
}

impl PipelineConfig {
    /// Default labels, no cap, no mask
    pub fn new(min_electron_pt: f64) -> Self {
        Self {
            electron_tag: InputTag::new("gsfElectrons"),
            met_tag: InputTag::new("pfMet"),
            selector: SelectorConfig::new(min_electron_pt),
            max_events: None,
            lumi_mask: None,
        }
    }

    pub fn with_max_events(mut self, max_events: u64) -> Self {
        self.max_events = Some(max_events);
        self
    }

    pub fn with_lumi_mask(mut self, mask: LumiMask) -> Self {
        self.lumi_mask = Some(mask);
        self
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Events pulled from the source
    pub events_read: u64,

    /// Events dropped by the lumi mask
    pub events_masked: u64,

    /// Events handed to the selector
    pub events_processed: u64,

    /// Records written to the sink
    pub records_written: u64,
}

/// Sequential event selection over a stream
#[derive(Debug, Clone)]
pub struct SelectionPipeline {
    electron_tag: InputTag,
    met_tag: InputTag,
    selector: EventSelector,
    max_events: Option<u64>,
    lumi_mask: Option<LumiMask>,
}

impl SelectionPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            electron_tag: config.electron_tag,
            met_tag: config.met_tag,
            selector: EventSelector::new(config.selector),
            max_events: config.max_events,
            lumi_mask: config.lumi_mask,
        }
    }

    pub fn selector(&self) -> &EventSelector {
        &self.selector
    }

    /// Select a single event using the configured collection labels
    pub fn process_event(&self, event: &Event) -> Decision {
        let electrons = event.electrons(&self.electron_tag);
        let mets = event.mets(&self.met_tag);
        self.selector.evaluate(electrons, mets, event.id())
    }

    /// Run over the whole stream
    ///
    /// The sink is closed before returning. A source or sink failure ends the
    /// run with that error; the sink is still closed on a best-effort basis.
    pub fn run<E, S>(&self, source: &mut E, sink: &mut S) -> Result<RunSummary>
    where
        E: EventSource + ?Sized,
        S: RecordSink + ?Sized,
    {
        match self.run_events(source, sink) {
            Ok(summary) => {
                sink.close()?;
                info!(
                    "Run complete: {} events read, {} masked, {} processed, {} records written",
                    summary.events_read,
                    summary.events_masked,
                    summary.events_processed,
                    summary.records_written
                );
                Ok(summary)
            }
            Err(e) => {
                if let Err(close_err) = sink.close() {
                    warn!("Failed to close sink after error: {}", close_err);
                }
                Err(e)
            }
        }
    }

    fn run_events<E, S>(&self, source: &mut E, sink: &mut S) -> Result<RunSummary>
    where
        E: EventSource + ?Sized,
        S: RecordSink + ?Sized,
    {
        let mut summary = RunSummary::default();

        write_header(sink)?;

        while let Some(event) = source.next_event()? {
            summary.events_read += 1;
            let id = event.id();

            if let Some(mask) = &self.lumi_mask {
                if !mask.contains(id.run, id.lumi) {
                    summary.events_masked += 1;
                    continue;
                }
            }

            if self
                .max_events
                .is_some_and(|max| summary.events_processed >= max)
            {
                info!("Reached maximum of {} events", summary.events_processed);
                break;
            }

            summary.events_processed += 1;
            metrics::counter!("wenu_events_total").increment(1);

            match self.process_event(&event) {
                Decision::Accepted(record) => {
                    write_record(sink, &record)?;
                    summary.records_written += 1;
                    metrics::counter!("wenu_records_written_total").increment(1);
                }
                Decision::Rejected(reason) => {
                    debug!("Event {} rejected: {}", id, reason);
                    metrics::counter!("wenu_events_rejected_total", "reason" => reason.as_str())
                        .increment(1);
                }
            }
        }

        Ok(summary)
    }
}
