//! Benchmarks for catalog search and booking submission
//!
//! Run with: cargo bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use medspace::booking::{BookingKind, BookingLedger, BookingRequest, BookingStore};
use medspace::catalog::{search, Catalog, EquipmentCategory, EquipmentFilter, FacilityFilter};
use medspace::storage::{FileStore, MemoryStore};
use std::sync::Arc;
use tempfile::tempdir;

fn bench_catalog(c: &mut Criterion) {
    let catalog = Catalog::seeded();
    let mut group = c.benchmark_group("catalog");

    group.bench_function("search_facilities", |b| {
        b.iter(|| search(black_box(&catalog.facilities), black_box("imaging")))
    });

    group.bench_function("filter_facilities", |b| {
        let filter = FacilityFilter::new()
            .query("center")
            .location("san francisco")
            .price_range(Some(500), Some(1000));
        b.iter(|| filter.apply(black_box(&catalog.facilities)))
    });

    group.bench_function("filter_equipment", |b| {
        let filter = EquipmentFilter::new().category(EquipmentCategory::Imaging);
        b.iter(|| filter.apply(black_box(&catalog.equipment)))
    });

    group.bench_function("search_visits", |b| {
        b.iter(|| catalog.search_visits(black_box("samples")))
    });

    group.bench_function("dashboard", |b| b.iter(|| catalog.dashboard()));

    group.finish();
}

fn bench_ledger(c: &mut Criterion) {
    let catalog = Catalog::seeded();
    let item = catalog.bookable(BookingKind::Equipment, 3);
    let request = BookingRequest::new(BookingKind::Equipment, 3)
        .date("2024-12-02")
        .time("08:00")
        .duration(4);

    let mut group = c.benchmark_group("ledger");

    group.throughput(Throughput::Elements(1000));
    group.bench_function("submit_1000", |b| {
        b.iter(|| {
            let mut ledger = BookingLedger::new();
            let now = Utc::now();
            for _ in 0..1000 {
                ledger.submit(black_box(&request), item.as_ref(), now).unwrap();
            }
            ledger.len()
        })
    });

    let mut ledger = BookingLedger::new();
    let now = Utc::now();
    for _ in 0..1000 {
        ledger.submit(&request, item.as_ref(), now).unwrap();
    }
    group.bench_function("summary_1000", |b| b.iter(|| black_box(&ledger).summary()));

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let catalog = Catalog::seeded();
    let item = catalog.bookable(BookingKind::Facility, 1);
    let request = BookingRequest::new(BookingKind::Facility, 1)
        .date("2024-11-15")
        .time("10:00")
        .duration(3);

    let mut group = c.benchmark_group("store");

    group.bench_function("create_memory", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let store = BookingStore::new(Arc::new(MemoryStore::new()));

                let start = std::time::Instant::now();
                for _ in 0..iters {
                    store.create(&request, item.as_ref()).await.unwrap();
                }
                start.elapsed()
            })
        });
    });

    group.bench_function("create_file", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let dir = tempdir().unwrap();
                let kv = FileStore::open(dir.path()).await.unwrap();
                let store = BookingStore::new(Arc::new(kv));

                let start = std::time::Instant::now();
                for _ in 0..iters {
                    store.create(&request, item.as_ref()).await.unwrap();
                }
                start.elapsed()
            })
        });
    });

    group.finish();
}

criterion_group!(benches, bench_catalog, bench_ledger, bench_store);
criterion_main!(benches);
