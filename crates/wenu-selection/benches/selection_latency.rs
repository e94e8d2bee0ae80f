//! Per-event selection latency
//!
//! Run with: cargo bench -p wenu-selection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use wenu_core::{Candidate, Collection, Event, EventId, MissingEnergy};
use wenu_selection::{PipelineConfig, SelectionPipeline};

fn event_with(electrons: Vec<Candidate>) -> Event {
    Event::new(EventId::new(160431, 20, 1))
        .with_electrons("gsfElectrons", Collection::new(electrons))
        .with_mets("pfMet", Collection::new(vec![MissingEnergy::new(32.0, 1.2)]))
}

fn benchmark_process_event(c: &mut Criterion) {
    let pipeline = SelectionPipeline::new(PipelineConfig::new(25.0));

    let cases = vec![
        ("empty", event_with(Vec::new())),
        (
            "single_barrel",
            event_with(vec![Candidate::new(38.0, 0.4, 1.1, -1).barrel()]),
        ),
        (
            "veto",
            event_with(vec![
                Candidate::new(38.0, 0.4, 1.1, -1).barrel(),
                Candidate::new(31.0, -1.9, -2.0, 1).endcap(),
            ]),
        ),
        (
            "soft_activity",
            event_with(
                (0..16)
                    .map(|i| Candidate::new(2.0 + i as f64, 0.1 * i as f64, 0.2, 1))
                    .chain(std::iter::once(Candidate::new(41.0, 0.3, 0.3, 1).barrel()))
                    .collect(),
            ),
        ),
    ];

    let mut group = c.benchmark_group("EventSelector");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, event) in &cases {
        group.bench_with_input(BenchmarkId::new("process_event", name), event, |b, event| {
            b.iter(|| pipeline.process_event(black_box(event)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_process_event);
criterion_main!(benches);
