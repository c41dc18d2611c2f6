//! # Local-Chain Pipeline Benchmarks
//!
//! | Stage | Input |
//! |-------|-------|
//! | Event translation | procedures with 1 to 256 events |
//! | Result assembly | full procedure to canonical result |
//! | Submit + commit | reference VM end to end |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lc_01_virtual_machine::prelude::{RuntimeEvent, TransactionProcedure, VmIdentifier};
use lc_02_execution_results::prelude::{
    assemble_transaction_result, translate_events, vm_identifier_to_transaction_id,
};
use lc_03_block_progression::prelude::BlockProgressionApi;
use lc_tests::fixtures::{service_transaction, test_emulator, tick};
use rand::Rng;
use serde_json::json;
use shared_types::{Address, FieldMap};

fn runtime_events(count: usize) -> Vec<RuntimeEvent> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let mut fields = FieldMap::new();
            fields.insert("seq".into(), json!(i));
            fields.insert("amount".into(), json!(rng.gen::<u32>()));
            fields.insert("memo".into(), json!(format!("event-{i}")));
            RuntimeEvent::encode("A.Bench.Moved", Address::SERVICE, &fields)
                .expect("bench fields encode")
        })
        .collect()
}

fn procedure(count: usize) -> TransactionProcedure {
    TransactionProcedure {
        id: VmIdentifier::digest(&count.to_be_bytes()),
        err: None,
        logs: vec!["bench".to_string()],
        events: runtime_events(count),
        computation_used: count as u64,
    }
}

fn bench_event_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("lc-02-event-translation");

    for size in [1usize, 16, 64, 256] {
        let events = runtime_events(size);
        let id = vm_identifier_to_transaction_id(&VmIdentifier::digest(b"bench"));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("translate_events", size),
            &events,
            |b, events| b.iter(|| black_box(translate_events(black_box(events), id, 0))),
        );
    }

    group.finish();
}

fn bench_result_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("lc-02-result-assembly");

    for size in [0usize, 16, 256] {
        let input = procedure(size);
        group.bench_with_input(
            BenchmarkId::new("assemble_transaction_result", size),
            &input,
            |b, input| b.iter(|| black_box(assemble_transaction_result(black_box(input), 3))),
        );
    }

    group.finish();
}

fn bench_submit_and_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("lc-03-block-progression");

    for block_size in [1usize, 32] {
        group.throughput(Throughput::Elements(block_size as u64));
        group.bench_with_input(
            BenchmarkId::new("submit_then_commit", block_size),
            &block_size,
            |b, &block_size| {
                let emulator = test_emulator().expect("emulator");
                b.iter(|| {
                    for n in 0..block_size {
                        let tx = service_transaction(&emulator, vec![tick(n as u64)])
                            .expect("signed transaction");
                        black_box(emulator.submit_transaction(tx).expect("appended"));
                    }
                    black_box(emulator.commit_block().expect("sealed"))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_event_translation,
    bench_result_assembly,
    bench_submit_and_commit
);
criterion_main!(benches);
