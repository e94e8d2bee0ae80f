//! End-to-end runs: JSON-lines events in, CSV records out

use std::path::{Path, PathBuf};

use wenu_core::{Error, EventSource, JsonLinesSource, Result};
use wenu_output::{CsvSink, MemorySink, RecordSink, HEADER};
use wenu_selection::{FilterConfig, SelectionPipeline};

const EVENTS: &str = r#"{"run": 160431, "lumi": 20, "event": 1, "electrons": {"gsfElectrons": {"items": [{"pt": 25.0, "eta": 0.5, "phi": 1.25, "charge": -1, "region": {"is_barrel": true}, "sigma_eta_eta": 0.0095, "hcal_over_ecal": 0.5, "iso_track": 1.5, "iso_ecal": 2.25, "iso_hcal": 0.75}]}}, "mets": {"pfMet": {"items": [{"pt": 31.5, "phi": -2.0}]}}}
{"run": 160431, "lumi": 20, "event": 2, "electrons": {"gsfElectrons": {"items": [{"pt": 25.0, "eta": 0.5, "phi": 1.0, "charge": -1}, {"pt": 30.0, "eta": -1.0, "phi": 2.0, "charge": 1}]}}, "mets": {"pfMet": {"items": [{"pt": 10.0, "phi": 0.5}]}}}
{"run": 160431, "lumi": 20, "event": 3, "electrons": {"gsfElectrons": {"items": [{"pt": 40.0, "eta": 0.5, "phi": 1.0, "charge": 1, "region": {"is_barrel": true}}]}}, "mets": {"pfMet": {"items": [{"pt": 10.0, "phi": 0.5}, {"pt": 12.0, "phi": 0.1}]}}}
{"run": 160431, "lumi": 21, "event": 4, "electrons": {"gsfElectrons": {"items": [{"pt": 12.0, "eta": 0.5, "phi": 1.0, "charge": 1}]}}, "mets": {"pfMet": {"items": [{"pt": 10.0, "phi": 0.5}]}}}
{"run": 160431, "lumi": 21, "event": 5, "electrons": {"gsfElectrons": {"valid": false}}, "mets": {"pfMet": {"items": [{"pt": 10.0, "phi": 0.5}]}}}
{"run": 160431, "lumi": 22, "event": 6, "electrons": {"gsfElectrons": {"items": [{"pt": 55.5, "eta": -2.0, "phi": -0.5, "charge": 1, "region": {"is_endcap": true}}]}}}
{"run": 160432, "lumi": 3, "event": 7, "electrons": {"gsfElectrons": {"items": [{"pt": 55.5, "eta": -2.0, "phi": -0.5, "charge": 1, "region": {"is_endcap": true}}]}}, "mets": {"pfMet": {"items": [{"pt": 22.0, "phi": 3.0}]}}}
"#;

fn setup(dir: &Path) -> FilterConfig {
    let input = dir.join("events.jsonl");
    std::fs::write(&input, EVENTS).unwrap();

    FilterConfig {
        min_electron_pt: Some(20.0),
        input_files: vec![input],
        csv_file_name: dir.join("Wenu.csv"),
        ..Default::default()
    }
}

fn run_to_file(config: &FilterConfig, output: &Path) -> String {
    let pipeline = SelectionPipeline::new(config.pipeline_config().unwrap());
    let mut source = JsonLinesSource::new(&config.input_files);
    let mut sink = CsvSink::create(output).unwrap();

    pipeline.run(&mut source, &mut sink).unwrap();

    std::fs::read_to_string(output).unwrap()
}

#[test]
fn test_selects_expected_events() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    let content = run_to_file(&config, &config.csv_file_name);
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines,
        vec![
            HEADER,
            "160431,1,25,0.5,1.25,-1,EB,0,0,0.0095,0.5,1.5,2.25,0.75,31.5,-2",
            "160432,7,55.5,-2,-0.5,1,EE,0,0,0,0,0,0,0,22,3",
        ]
    );
}

#[test]
fn test_output_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());

    let first = run_to_file(&config, &dir.path().join("first.csv"));
    let second = run_to_file(&config, &dir.path().join("second.csv"));

    assert_eq!(first, second);
}

#[test]
fn test_lumi_mask_restricts_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());

    let mask = dir.path().join("good.json");
    std::fs::write(&mask, r#"{"160431": [[1, 20]]}"#).unwrap();
    config.lumi_mask = Some(mask);

    let content = run_to_file(&config, &config.csv_file_name);
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("160431,1,"));
}

#[test]
fn test_max_events() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());
    config.max_events = Some(1);

    let content = run_to_file(&config, &config.csv_file_name);
    assert_eq!(content.lines().count(), 2);
}

/// Source that fails after yielding its events
struct FailingSource {
    inner: JsonLinesSource,
}

impl EventSource for FailingSource {
    fn next_event(&mut self) -> Result<Option<wenu_core::Event>> {
        match self.inner.next_event()? {
            Some(event) => Ok(Some(event)),
            None => Err(Error::input("stream truncated")),
        }
    }
}

#[test]
fn test_sink_closed_when_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    let pipeline = SelectionPipeline::new(config.pipeline_config().unwrap());

    let mut source = FailingSource {
        inner: JsonLinesSource::new(&config.input_files),
    };
    let mut sink = MemorySink::new();

    let err = pipeline.run(&mut source, &mut sink).unwrap_err();

    assert!(matches!(err, Error::Input(_)));
    assert!(sink.is_closed());
    // header plus the records selected before the failure
    assert_eq!(sink.lines().len(), 3);
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(dir.path());
    config.input_files = vec![PathBuf::from("/nonexistent/events.jsonl")];

    let pipeline = SelectionPipeline::new(config.pipeline_config().unwrap());
    let mut source = JsonLinesSource::new(&config.input_files);
    let mut sink = MemorySink::new();

    assert!(pipeline.run(&mut source, &mut sink).is_err());
    assert!(sink.is_closed());
    assert_eq!(sink.lines(), [HEADER.to_string()]);
}

#[test]
fn test_dyn_sink() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path());
    let pipeline = SelectionPipeline::new(config.pipeline_config().unwrap());

    let mut source: Box<dyn EventSource> = Box::new(JsonLinesSource::new(&config.input_files));
    let mut sink: Box<dyn RecordSink> = Box::new(MemorySink::new());

    let summary = pipeline.run(source.as_mut(), sink.as_mut()).unwrap();
    assert_eq!(summary.events_processed, 7);
    assert_eq!(summary.records_written, 2);
}
