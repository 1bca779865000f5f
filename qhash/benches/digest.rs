use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use qhash::QHasher;

fn bench_presets(c: &mut Criterion) {
    let input: Vec<u8> = (0..256u32).map(|i| (i * 29 + 11) as u8).collect();
    let mut group = c.benchmark_group("digest");
    group.throughput(Throughput::Bytes(input.len() as u64));
    for name in ["compact", "standard", "entangled", "quantized", "walk"] {
        let hasher = QHasher::from_preset(name).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| hasher.digest(black_box(input)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_presets);
criterion_main!(benches);
