use std::fmt::Write;

use arbor_json::{parse, Arena};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn build_document(records: usize) -> String {
    let mut out = String::from("[");
    for idx in 0..records {
        if idx > 0 {
            out.push(',');
        }
        write!(
            out,
            "{{\"id\": {idx}, \"name\": 'lot-{idx}', \"area\": {}.25, \"tags\": [true, null, -{idx}e-2]}}",
            idx * 3
        )
        .unwrap();
    }
    out.push(']');
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for records in [100usize, 10_000] {
        let input = build_document(records);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(records), &input, |b, input| {
            let mut arena = Arena::for_input(input.len());
            b.iter(|| {
                let value = parse(&arena, black_box(input)).map(|value| value.kind());
                black_box(value).ok();
                arena.reset();
            });
        });
    }
    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let depth = 50_000;
    let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    c.bench_function("parse_deep_nesting", |b| {
        b.iter(|| {
            let arena = Arena::for_input(input.len());
            black_box(parse(&arena, black_box(&input)).is_ok());
        });
    });
}

criterion_group!(benches, bench_parse, bench_deep_nesting);
criterion_main!(benches);
