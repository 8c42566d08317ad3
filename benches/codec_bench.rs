use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use intact::digest::hash_bytes;
use intact::manifest::{ManifestEntry, codec};
use std::hint::black_box;

fn create_entries(count: usize) -> Vec<ManifestEntry> {
    (0..count)
        .map(|i| {
            let name = format!("data/file_{i:06}.bin");
            let digest = hash_bytes(name.as_bytes());
            ManifestEntry::new(name, digest)
        })
        .collect()
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("manifest_encode");

    for count in [10usize, 1_000, 10_000] {
        let entries = create_entries(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| codec::encode(black_box(entries)));
        });
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("manifest_decode");

    for count in [10usize, 1_000, 10_000] {
        let text = codec::encode(&create_entries(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| codec::decode(black_box(text)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_encode, benchmark_decode);
criterion_main!(benches);
