//! Byte-fill benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use crrt_core::string::memset;

fn bench_memset_sizes(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 64, 256, 1024, 4096, 65536];
    let mut group = c.benchmark_group("memset");

    for &size in sizes {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("crrt", size), &size, |b, &sz| {
            let mut dst = vec![0u8; sz];
            b.iter(|| {
                black_box(memset(&mut dst, black_box(0x5A), sz));
            });
        });

        group.bench_with_input(BenchmarkId::new("slice_fill", size), &size, |b, &sz| {
            let mut dst = vec![0u8; sz];
            b.iter(|| {
                dst.fill(black_box(0x5A));
                black_box(&dst);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_memset_sizes);
criterion_main!(benches);
