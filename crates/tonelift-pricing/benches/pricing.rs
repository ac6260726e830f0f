//! Tonelift pricing benchmarks
//!
//! Quote computation sits on the storefront hot path; every catalog render
//! fans out into one quote per service. These benchmarks cover the raw
//! discount formula, full quote construction, and schedule lookups.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal_macros::dec;
use std::time::Duration;
use tonelift_common::{ServiceKind, SubscriptionTier};
use tonelift_pricing::{final_price, DurationDiscountSchedule, PricingResolver};

// ============ FORMULA BENCHMARKS ============

/// Benchmark the bare discount formula
fn bench_final_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("formula");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("exact_fraction", |b| {
        let base = dec!(210000);
        let fraction = dec!(0.20);
        b.iter(|| final_price(black_box(base), black_box(fraction)));
    });

    group.bench_function("repeating_fraction", |b| {
        let base = dec!(9900);
        let third = rust_decimal::Decimal::ONE / dec!(3);
        b.iter(|| final_price(black_box(base), black_box(third)));
    });

    group.finish();
}

// ============ QUOTE BENCHMARKS ============

/// Benchmark full quote construction per tier
fn bench_subscription_quotes(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscription_quote");
    group.measurement_time(Duration::from_secs(5));

    let resolver = PricingResolver::standard();

    for tier in SubscriptionTier::ALL {
        group.bench_with_input(BenchmarkId::new("tier", tier), &tier, |b, &tier| {
            b.iter(|| {
                resolver.subscription_quote(black_box(ServiceKind::ConcertPromotion), tier)
            });
        });
    }

    group.finish();
}

/// Benchmark campaign quotes across the schedule bands
fn bench_campaign_quotes(c: &mut Criterion) {
    let mut group = c.benchmark_group("campaign_quote");
    group.measurement_time(Duration::from_secs(5));

    let resolver = PricingResolver::standard();

    for days in [7u32, 30, 90, 365] {
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, &days| {
            b.iter(|| resolver.campaign_quote(black_box(ServiceKind::BannerAd), days));
        });
    }

    group.finish();
}

// ============ SCHEDULE BENCHMARKS ============

/// Benchmark raw schedule lookups
fn bench_schedule_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");
    group.measurement_time(Duration::from_secs(5));

    let schedule = DurationDiscountSchedule::standard();
    let day_counts: Vec<u32> = (0..365).collect();

    group.throughput(Throughput::Elements(day_counts.len() as u64));
    group.bench_function("year_sweep", |b| {
        b.iter(|| {
            for days in black_box(&day_counts) {
                black_box(schedule.fraction_for(*days));
            }
        });
    });

    group.finish();
}

// ============ CRITERION CONFIGURATION ============

criterion_group!(
    pricing,
    bench_final_price,
    bench_subscription_quotes,
    bench_campaign_quotes,
    bench_schedule_lookup,
);

criterion_main!(pricing);
