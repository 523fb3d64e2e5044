// ABOUTME: Criterion benchmarks for workout history analytics
// ABOUTME: Measures summary, weekly recap and single-workout recap cost as history grows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the analytics recomputed on every history change.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

mod common;

use common::fixtures::{bench_now, generate_workouts, WorkoutBatchSize};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ironlog_intelligence::{compute_summary, progress_streak, weekly_recap, workout_recap};

const SIZES: [WorkoutBatchSize; 3] = [
    WorkoutBatchSize::Small,
    WorkoutBatchSize::Medium,
    WorkoutBatchSize::Large,
];

fn bench_compute_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_summary");
    let now = bench_now();

    for size in SIZES {
        let workouts = generate_workouts(size.count());
        group.throughput(Throughput::Elements(size.count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size.name()),
            &workouts,
            |b, workouts| b.iter(|| compute_summary(black_box(workouts), now)),
        );
    }

    group.finish();
}

fn bench_weekly_recap(c: &mut Criterion) {
    let mut group = c.benchmark_group("weekly_recap");
    let now = bench_now();

    for size in SIZES {
        let workouts = generate_workouts(size.count());
        group.throughput(Throughput::Elements(size.count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size.name()),
            &workouts,
            |b, workouts| b.iter(|| weekly_recap(black_box(workouts), now)),
        );
    }

    group.finish();
}

fn bench_workout_recap(c: &mut Criterion) {
    let mut group = c.benchmark_group("workout_recap");

    for size in SIZES {
        let workouts = generate_workouts(size.count());
        let latest = workouts[0].clone();
        group.throughput(Throughput::Elements(size.count() as u64));
        group.bench_with_input(
            BenchmarkId::new("latest", size.name()),
            &workouts,
            |b, workouts| b.iter(|| workout_recap(black_box(&latest), black_box(workouts))),
        );
        group.bench_with_input(
            BenchmarkId::new("streak_only", size.name()),
            &workouts,
            |b, workouts| b.iter(|| progress_streak(black_box(workouts))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_summary,
    bench_weekly_recap,
    bench_workout_recap
);
criterion_main!(benches);
