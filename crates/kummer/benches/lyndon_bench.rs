//! Benchmarks for shuffle products and Lyndon basis conversion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kummer_words::{
    comultiply, generate_lyndon_words, shuffle_product, to_lyndon_basis, word, Word, WordExpr,
};

/// Generates a deterministic word over a small alphabet.
fn cycling_word(length: usize, alphabet: u8, offset: usize) -> Word {
    (0..length)
        .map(|i| ((i * 7 + offset * 3) % usize::from(alphabet)) as u8)
        .collect()
}

/// Generates a sum of non-Lyndon words of one length.
fn mixed_expr(length: usize, terms: usize) -> WordExpr {
    (0..terms)
        .map(|i| (cycling_word(length, 4, i), (i as i32 % 5) - 2))
        .collect()
}

fn bench_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffle");

    for size in [2, 4, 6, 8] {
        let u = cycling_word(size, 5, 0);
        let v = cycling_word(size, 5, 1);

        group.bench_with_input(BenchmarkId::new("shuffle_product", size), &size, |b, _| {
            b.iter(|| black_box(shuffle_product(&u, &v)))
        });
    }

    group.finish();
}

fn bench_lyndon_basis(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_lyndon_basis");
    group.sample_size(50);

    for length in [3, 5, 7] {
        let expr = mixed_expr(length, 20);

        group.bench_with_input(BenchmarkId::new("mixed", length), &length, |b, _| {
            b.iter(|| black_box(to_lyndon_basis(&expr)))
        });
    }

    // Worst case: a single word with many equal factors
    let repeated: WordExpr = WordExpr::single_key(word(&[1, 0, 1, 0, 1, 0, 1, 0]));
    group.bench_function("repeated_factors", |b| {
        b.iter(|| black_box(to_lyndon_basis(&repeated)))
    });

    group.finish();
}

fn bench_comultiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("comultiply");

    let expr = mixed_expr(6, 20);
    for form in [(1, 5), (2, 4), (3, 3)] {
        group.bench_with_input(
            BenchmarkId::new("weight_6", format!("{}_{}", form.0, form.1)),
            &form,
            |b, &form| b.iter(|| black_box(comultiply(&expr, form))),
        );
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_lyndon_words");

    for length in [4, 6, 8] {
        group.bench_with_input(BenchmarkId::new("alphabet_4", length), &length, |b, &length| {
            b.iter(|| black_box(generate_lyndon_words(4, length)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_shuffle,
    bench_lyndon_basis,
    bench_comultiply,
    bench_generate
);

criterion_main!(benches);
