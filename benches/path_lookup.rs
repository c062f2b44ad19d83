// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs)]
#![allow(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use lookup::{ParsedPath, Value};

fn sample() -> Value {
    let users: Vec<Value> = (0..64)
        .map(|i| {
            Value::dict([
                ("id", Value::from(i)),
                ("name", Value::from(format!("user{i}"))),
                (
                    "profile",
                    Value::dict([("stats", Value::array([i, i * 2, i * 3, i * 4, i * 5]))]),
                ),
            ])
        })
        .collect();
    Value::dict([
        ("users", Value::Sequence(users)),
        ("root", Value::from_slice(br#"{"level1": {"level2": {"level3": {"level4": 1}}}}"#)),
    ])
}

fn bench_lookup(c: &mut Criterion) {
    let value = sample();
    let paths = [
        "users",
        "users.12.name",
        "users.63.profile.stats.4",
        "root.level1.level2.level3.level4",
        "users.64.name",
        "missing.path",
    ];

    let mut group = c.benchmark_group("path_lookup");

    group.bench_function("lookup_borrowed", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(value.lookup(black_box(path)).is_absent());
            }
        });
    });

    group.bench_function("get_owned", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(value.get(black_box(path)));
            }
        });
    });

    let parsed: Vec<ParsedPath> = paths.iter().map(|p| ParsedPath::parse(p)).collect();
    group.bench_function("lookup_preparsed", |b| {
        b.iter(|| {
            for path in &parsed {
                black_box(value.lookup_parsed(black_box(path)).is_absent());
            }
        });
    });

    group.finish();
}

fn bench_text_descent(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_descent");

    for size in [4usize, 64, 512] {
        let items: Vec<String> = (0..size).map(|i| format!("\"item{i}\"")).collect();
        let text = Value::from(format!("[{}]", items.join(",")));
        let path = (size - 1).to_string();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(text.get(black_box(&path))));
        });
    }

    group.finish();
}

fn bench_coercion(c: &mut Criterion) {
    let number = Value::from(12345);
    let text = Value::from("12345");
    let fraction = Value::from(123.75);

    let mut group = c.benchmark_group("coercion");
    group.bench_function("number_to_i32", |b| b.iter(|| black_box(number.i32())));
    group.bench_function("text_to_i32", |b| b.iter(|| black_box(text.i32())));
    group.bench_function("fraction_to_i32", |b| b.iter(|| black_box(fraction.i32())));
    group.bench_function("text_to_bool", |b| b.iter(|| black_box(text.bool())));
    group.finish();
}

fn bench_set(c: &mut Criterion) {
    c.bench_function("set_vivify_depth_4", |b| {
        b.iter(|| {
            let mut value = Value::Absent;
            let _ = value.set(black_box("a.b.c.d"), 1);
            black_box(value)
        });
    });
}

criterion_group!(benches, bench_lookup, bench_text_descent, bench_coercion, bench_set);
criterion_main!(benches);
