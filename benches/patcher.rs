//! Benchmarks for constant pool scanning and patching.
//!
//! The synthetic class has a few hundred records of mixed kinds with the target literal near
//! the end, so every run walks most of the pool before splicing.

extern crate classpatch;

use classpatch::classfile::ConstantPoolPatcher;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

/// Builds a class with `filler` text/integer pairs followed by `java/lang/System`.
fn synthetic_class(filler: u16) -> Vec<u8> {
    let mut data = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34];
    data.extend_from_slice(&(filler * 4 + 2).to_be_bytes());

    for i in 0..filler {
        let name = format!("com/example/Generated{i}");
        data.push(0x01);
        data.extend_from_slice(&(name.len() as u16).to_be_bytes());
        data.extend_from_slice(name.as_bytes());

        data.push(0x03);
        data.extend_from_slice(&u32::from(i).to_be_bytes());

        // Long: two slots
        data.push(0x05);
        data.extend_from_slice(&u64::from(i).to_be_bytes());
    }

    let target = b"java/lang/System";
    data.push(0x01);
    data.extend_from_slice(&(target.len() as u16).to_be_bytes());
    data.extend_from_slice(target);

    // access flags, this_class, super_class
    data.extend_from_slice(&[0x00, 0x21, 0x00, 0x01, 0x00, 0x02]);
    data
}

fn bench_scan_constants(c: &mut Criterion) {
    let patcher = ConstantPoolPatcher::new(synthetic_class(256));

    c.bench_function("scan_constants_1k", |b| {
        b.iter(|| {
            let records = black_box(&patcher)
                .constants()
                .unwrap()
                .filter(Result::is_ok)
                .count();
            black_box(records)
        });
    });
}

fn bench_find_utf8(c: &mut Criterion) {
    let patcher = ConstantPoolPatcher::new(synthetic_class(256));

    c.bench_function("find_utf8_case_insensitive", |b| {
        b.iter(|| {
            let record = patcher.find_utf8(black_box("JAVA/LANG/SYSTEM")).unwrap();
            black_box(record)
        });
    });
}

fn bench_patch_redirect(c: &mut Criterion) {
    let class = synthetic_class(256);

    c.bench_function("patch_utf8_redirect", |b| {
        b.iter_batched(
            || ConstantPoolPatcher::new(class.clone()),
            |patcher| {
                let outcome = patcher
                    .patch_utf8(
                        black_box("java/lang/System"),
                        black_box("classpatch/exec/CaptureSystem"),
                    )
                    .unwrap();
                black_box(outcome)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_patch_absent(c: &mut Criterion) {
    let class = synthetic_class(256);

    c.bench_function("patch_utf8_absent", |b| {
        b.iter_batched(
            || ConstantPoolPatcher::new(class.clone()),
            |patcher| {
                let outcome = patcher.patch_utf8(black_box("not/Present"), "x").unwrap();
                black_box(outcome)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_scan_constants,
    bench_find_utf8,
    bench_patch_redirect,
    bench_patch_absent
);
criterion_main!(benches);
