//! Tap Overhead Benchmarks
//!
//! Compares reads and writes through a tap against the bare delegate:
//! - Raw cursor reads vs. observed reads
//! - Duplex tap with no observers (pass-through path)
//! - Observed writes into a growing buffer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use iotap_stream::{read_tap, write_tap, ObserverFn, ReadWriteTap};
use std::io::{Cursor, Read, Write};

const PAYLOAD_LEN: usize = 64 * 1024;

fn payload() -> Vec<u8> {
    (0..PAYLOAD_LEN).map(|i| (i % 251) as u8).collect()
}

fn drain<R: Read>(mut reader: R, chunk: usize) -> usize {
    let mut buf = vec![0u8; chunk];
    let mut total = 0;
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            return total;
        }
        total += n;
    }
}

/// Benchmark: Reading the whole payload with varying chunk sizes
fn bench_read(c: &mut Criterion) {
    let data = payload();
    let chunk_sizes = vec![64, 1024, 16 * 1024];

    for chunk in chunk_sizes {
        c.bench_with_input(BenchmarkId::new("read_raw", chunk), &chunk, |b, &chunk| {
            b.iter(|| black_box(drain(Cursor::new(&data), chunk)))
        });

        c.bench_with_input(BenchmarkId::new("read_tapped", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut seen = 0usize;
                let total = drain(
                    read_tap(Cursor::new(&data), Some(|p: &[u8]| seen += p.len())),
                    chunk,
                );
                black_box((total, seen))
            })
        });
    }
}

/// Benchmark: Duplex tap with neither side observed
fn bench_duplex_passthrough(c: &mut Criterion) {
    let data = payload();

    c.bench_function("duplex_passthrough_read", |b| {
        b.iter(|| {
            let tap = ReadWriteTap::new(
                Cursor::new(data.clone()),
                None::<ObserverFn>,
                None::<ObserverFn>,
            );
            black_box(drain(tap, 1024))
        })
    });
}

/// Benchmark: Observed writes
fn bench_write(c: &mut Criterion) {
    let data = payload();

    c.bench_function("write_tapped", |b| {
        b.iter(|| {
            let mut writes = 0u64;
            let mut tap = write_tap(
                Vec::<u8>::with_capacity(PAYLOAD_LEN),
                Some(|_: &[u8]| writes += 1),
            );
            for chunk in data.chunks(1024) {
                tap.write_all(chunk).unwrap();
            }
            let len = tap.into_inner().len();
            black_box((len, writes))
        })
    });
}

criterion_group!(benches, bench_read, bench_duplex_passthrough, bench_write);
criterion_main!(benches);
