//! Call round-trip benchmark suite.
//!
//! Measures handshake and call overhead over the in-memory stream, so the
//! numbers reflect framing and validation rather than the network:
//! - Argument counts: 0, 8, 64
//!
//! Run with: cargo bench --bench round_trip
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dnode_sync_client::protocol::{CallResponse, MethodsDescriptor};
use dnode_sync_client::{CallbackId, Connection, MockStream};
use serde_json::{Value, json};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const ARGUMENT_COUNTS: &[usize] = &[0, 8, 64];

const METHODS_LINE: &str = "{\"method\":\"methods\",\"arguments\":[{\"echo\":\"[Function]\"}]}\n";

// ============================================================================
// Benchmark: Handshake
// ============================================================================

fn bench_handshake(c: &mut Criterion) {
    c.bench_function("handshake", |b| {
        b.iter(|| {
            let stream = MockStream::new();
            stream.push_read(METHODS_LINE);
            black_box(Connection::new(stream).expect("handshake"))
        });
    });

    c.bench_function("parse_methods", |b| {
        b.iter(|| black_box(MethodsDescriptor::parse(black_box(METHODS_LINE)).expect("parse")));
    });
}

// ============================================================================
// Benchmark: Call Round Trip
// ============================================================================

fn bench_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("call");

    for &count in ARGUMENT_COUNTS {
        let arguments: Vec<Value> = (0..count).map(|i| json!({"index": i})).collect();

        group.bench_with_input(BenchmarkId::new("echo", count), &arguments, |b, arguments| {
            let stream = MockStream::new();
            stream.push_read(METHODS_LINE);
            let mut connection = Connection::new(stream.clone()).expect("handshake");

            b.iter(|| {
                let id = connection.last_callback_id().next();
                let response = json!({"method": id, "arguments": [null, arguments]});
                stream.push_read(format!("{response}\n"));

                let result = connection.call("echo", arguments).expect("call");
                stream.take_writes();
                black_box(result)
            });
        });

        let line = format!("{}\n", json!({"method": 42, "arguments": arguments}));
        group.bench_with_input(BenchmarkId::new("parse_response", count), &line, |b, line| {
            b.iter(|| black_box(CallResponse::parse(line, CallbackId::new(42)).expect("parse")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_handshake, bench_call);
criterion_main!(benches);
