//! Benchmarks for score submission and admission-threshold checks
//!
//! Run with: cargo bench --bench threshold

use cosmian_crypto_core::{CsRng, reexport::rand_core::SeedableRng};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use scorevault_core::prelude::*;

fn principal(i: u32) -> Principal {
    Principal::from_key_material(&i.to_be_bytes())
}

fn setup(num_students: u32) -> (SealedCoprocessor, Vec<Principal>) {
    let cop = SealedCoprocessor::from_rng(CsRng::from_seed([42u8; 32])).unwrap();
    let students = (0..num_students).map(|i| principal(1_000 + i)).collect();
    (cop, students)
}

fn populated<'a>(
    cop: &'a SealedCoprocessor,
    students: &[Principal],
) -> ScoreVault<&'a SealedCoprocessor> {
    let registrar = principal(0);
    let teacher = principal(1);
    let mut vault = ScoreVault::new(registrar, cop).unwrap();
    vault.authorize_teacher(&registrar, teacher).unwrap();
    for (i, student) in students.iter().enumerate() {
        let input = cop.encrypt_u32((i % 101) as u32, &teacher).unwrap();
        vault.submit_score(&teacher, *student, &input).unwrap();
    }
    vault
}

fn bench_submit_score(c: &mut Criterion) {
    let (cop, students) = setup(1);
    let mut vault = populated(&cop, &[]);
    let teacher = principal(1);
    let input = cop.encrypt_u32(85, &teacher).unwrap();

    c.bench_function("submit_score", |b| {
        b.iter(|| vault.submit_score(black_box(&teacher), students[0], black_box(&input)).unwrap())
    });
}

fn bench_meets_admission_threshold(c: &mut Criterion) {
    let (cop, students) = setup(1);
    let mut vault = populated(&cop, &students);
    let school = principal(2);

    c.bench_function("meets_admission_threshold", |b| {
        b.iter(|| {
            vault
                .meets_admission_threshold(black_box(&school), black_box(&students[0]), 50)
                .unwrap()
        })
    });
}

fn bench_batch_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_check_admission_threshold");

    // Half the queried students have no record
    let sizes = [8u32, 32, 128, 512];

    for size in sizes {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let (cop, students) = setup(size);
            let mut vault = populated(&cop, &students[..students.len() / 2]);
            let school = principal(2);

            b.iter(|| {
                vault
                    .batch_check_admission_threshold(black_box(&school), black_box(&students), 50)
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_submit_score, bench_meets_admission_threshold, bench_batch_check);
criterion_main!(benches);
