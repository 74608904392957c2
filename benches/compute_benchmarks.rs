//! Performance benchmarks for the coverage engine.
//!
//! Covers the engine called directly over periods of increasing length,
//! scaling with the number of posts, and the HTTP path for a seeded
//! device's monthly results.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use coverage_engine::api::{AppState, create_router};
use coverage_engine::calculation::compute;
use coverage_engine::config::ConfigLoader;
use coverage_engine::models::{DayKey, Holiday, Post, ScheduleTemplate};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Posts alternating between a day shift and a night shift on every key.
fn create_posts(count: i64) -> (Vec<Post>, Vec<ScheduleTemplate>) {
    let posts: Vec<Post> = (1..=count)
        .map(|id| Post {
            id,
            device_id: 1,
            name: format!("Poste {:03}", id),
        })
        .collect();

    let templates = posts
        .iter()
        .flat_map(|post| {
            let (start, end) = if post.id % 2 == 0 {
                ("07:00", "19:00")
            } else {
                ("19:00", "07:00")
            };
            DayKey::ALL.into_iter().map(move |day_key| ScheduleTemplate {
                post_id: post.id,
                day_key,
                start_time: Some(start.to_string()),
                end_time: Some(end.to_string()),
                is_closed: false,
            })
        })
        .collect();

    (posts, templates)
}

fn create_holidays() -> Vec<Holiday> {
    [(1, 1), (4, 21), (5, 1), (7, 14), (8, 15), (11, 11), (12, 25)]
        .into_iter()
        .map(|(month, day)| Holiday {
            date: make_date(2025, month, day),
            label: String::new(),
        })
        .collect()
}

/// Benchmark: ten posts over a week, a month and a year.
fn bench_period_length(c: &mut Criterion) {
    let (posts, templates) = create_posts(10);
    let holidays = create_holidays();
    let start = make_date(2025, 1, 1);

    let mut group = c.benchmark_group("period_length");
    for (label, end) in [
        ("week", make_date(2025, 1, 7)),
        ("month", make_date(2025, 1, 31)),
        ("year", make_date(2025, 12, 31)),
    ] {
        let days = (end - start).num_days() as u64 + 1;
        group.throughput(Throughput::Elements(days * posts.len() as u64));
        group.bench_with_input(BenchmarkId::new("ten_posts", label), &end, |b, end| {
            b.iter(|| {
                black_box(compute(
                    black_box(&posts),
                    black_box(&templates),
                    black_box(&holidays),
                    start,
                    *end,
                ))
            })
        });
    }
    group.finish();
}

/// Benchmark: one month with a growing number of posts.
fn bench_post_scaling(c: &mut Criterion) {
    let holidays = create_holidays();
    let start = make_date(2025, 5, 1);
    let end = make_date(2025, 5, 31);

    let mut group = c.benchmark_group("post_scaling");
    for count in [1_i64, 10, 50, 200] {
        let (posts, templates) = create_posts(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("posts", count), &count, |b, _| {
            b.iter(|| black_box(compute(&posts, &templates, &holidays, start, end)))
        });
    }
    group.finish();
}

/// Benchmark: monthly results of a seeded device through the router.
fn bench_device_results(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::new(config));

    c.bench_function("device_results_month", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/devices/1/results?start_date=2025-05-01&end_date=2025-05-31")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_period_length,
    bench_post_scaling,
    bench_device_results,
);
criterion_main!(benches);
