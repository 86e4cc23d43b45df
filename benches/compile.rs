use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fex::compile;

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_simple", |b| {
        b.iter(|| black_box(compile("1").unwrap()))
    });

    c.bench_function("compile_group", |b| {
        b.iter(|| black_box(compile(":{1,2:4,-1}").unwrap()))
    });

    c.bench_function("compile_regexp", |b| {
        b.iter(|| black_box(compile(" /[a-z]+[0-9]/").unwrap()))
    });

    c.bench_function("compile_chain", |b| {
        b.iter(|| black_box(compile("1.1:{?4}").unwrap()))
    });
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
