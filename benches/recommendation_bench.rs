// ABOUTME: Criterion benchmarks for the recommendation engine and the recommendation read path
// ABOUTME: Measures table generation alone and end-to-end over an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! Criterion benchmarks for next-set recommendations.
//!
//! The engine is pure arithmetic, so the database benchmark shows how much of a
//! request is spent on the three lookups rather than on the table itself.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use liftlog::database::Database;
use liftlog::intelligence::{recommend, OneRepMaxEstimate};
use liftlog::models::{ExerciseProfile, NewBodyweight, NewWorkout, Profile, SetRecord, User};
use liftlog::services::recommendations::{build_table, load_inputs};
use tokio::runtime::Runtime;

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    let barbell = SetRecord::new(5, 100.0, 8.0);
    let weighted_dip = SetRecord::new(8, 10.0, 8.0).with_recorded_bodyweight(80.0);
    let profile = Profile::new(82.5);

    group.bench_function("one_rep_max_estimate", |b| {
        b.iter(|| OneRepMaxEstimate::from_set(black_box(&barbell)));
    });

    for (name, record, exercise) in [
        ("external_load", &barbell, ExerciseProfile::EXTERNAL_LOAD),
        ("bodyweight_assisted", &weighted_dip, ExerciseProfile::BODYWEIGHT_ASSISTED),
    ] {
        group.bench_with_input(BenchmarkId::new("full_table", name), record, |b, record| {
            b.iter(|| {
                recommend(Some(black_box(record)), &profile, exercise, black_box(5))
                    .map(Iterator::count)
            });
        });
    }

    group.bench_function("no_history", |b| {
        b.iter(|| {
            recommend(None, &profile, ExerciseProfile::EXTERNAL_LOAD, black_box(5))
                .map(Iterator::count)
        });
    });

    group.finish();
}

fn bench_read_path(c: &mut Criterion) {
    let runtime = Runtime::new().expect("Failed to create tokio runtime");

    let (database, user_id) = runtime.block_on(async {
        let database = Database::new("sqlite::memory:").await.unwrap();
        database.seed_exercises().await.unwrap();

        let user = User::new("bench@example.com".into(), "unused".into(), None);
        database.create_user(&user).await.unwrap();
        database
            .record_bodyweight(user.id, &NewBodyweight { weight: 80.0 })
            .await
            .unwrap();

        // A realistic history so the latest-set lookup has rows to order
        for reps in 1..=200_u32 {
            let workout = NewWorkout {
                exercise_name: "Dips".into(),
                reps: reps % 12 + 1,
                weight: f64::from(reps % 8) * 2.5,
                rpe: 8.0,
            };
            database.create_workout(user.id, &workout).await.unwrap();
        }

        (database, user.id)
    });

    c.bench_function("recommendation_read_path", |b| {
        b.to_async(&runtime).iter(|| async {
            let inputs = load_inputs(&database, user_id, "Dips").await.unwrap();
            build_table(inputs, Some(black_box(5))).unwrap()
        });
    });
}

criterion_group!(benches, bench_engine, bench_read_path);
criterion_main!(benches);
