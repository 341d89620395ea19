//! Criterion benchmarks for outline extraction, drill extraction and DXF emission.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use outline_dxf::{dxf, excellon, gerber, HoleFilter};

fn convert_bench(c: &mut Criterion) {
    let outline_text = include_str!("../tests/fixtures/board/board-Edge_Cuts.gbr");
    let drill_text = include_str!("../tests/fixtures/board/board-PTH.drl");
    let mut group = c.benchmark_group("convert");

    group.bench_function("gerber_extract", |b| {
        b.iter(|| black_box(gerber::extract(black_box(outline_text))))
    });

    group.bench_function("excellon_extract", |b| {
        b.iter(|| black_box(excellon::extract(black_box(drill_text), HoleFilter::any())))
    });

    let outline = gerber::extract(outline_text);
    let drill = excellon::extract(drill_text, HoleFilter::any());
    group.bench_function("dxf_emit", |b| {
        b.iter(|| black_box(dxf::emit(black_box(&outline.entities), black_box(&drill.holes))))
    });

    group.finish();
}

criterion_group!(benches, convert_bench);
criterion_main!(benches);
