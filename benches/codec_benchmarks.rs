//! Codec benchmarks
//!
//! Measures the hot paths of the wire codec: varint encode/decode and ACK
//! frame encode/decode with realistic range counts.

use bytes::{Buf, BytesMut};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use quic_wire::{AckFrame, EcnCounts, Frame, RangeSet, varint};

fn bench_varint(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint");

    group.bench_function("write_mixed_widths", |b| {
        let values = [37u64, 16383, 1073741823, 151288809941952652];
        b.iter(|| {
            let mut buf = BytesMut::with_capacity(32);
            for value in values {
                varint::write(&mut buf, black_box(value));
            }
            black_box(buf)
        });
    });

    group.bench_function("read_mixed_widths", |b| {
        let mut encoded = BytesMut::new();
        for value in [37u64, 16383, 1073741823, 151288809941952652] {
            varint::write(&mut encoded, value);
        }
        let encoded = encoded.freeze();
        b.iter(|| {
            let mut buf = encoded.clone();
            while buf.has_remaining() {
                black_box(varint::read(&mut buf).unwrap());
            }
        });
    });

    group.finish();
}

fn sample_ack() -> AckFrame {
    let mut ranges = RangeSet::new();
    // 32 ranges with small gaps, roughly what a lossy path produces
    for i in 0..32u64 {
        let lo = i * 100;
        ranges.insert(lo..=lo + 90);
    }
    AckFrame::with_ecn(1200, ranges, EcnCounts::new(900, 0, 12))
}

fn bench_ack_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("ack_frame");
    let frame = sample_ack();
    let encoded = frame.to_bytes();

    group.bench_function("encode_32_ranges", |b| {
        b.iter(|| black_box(frame.to_bytes()));
    });

    group.bench_function("decode_32_ranges", |b| {
        b.iter(|| {
            let mut buf = encoded.clone();
            black_box(Frame::parse(&mut buf).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_varint, bench_ack_frame);
criterion_main!(benches);
