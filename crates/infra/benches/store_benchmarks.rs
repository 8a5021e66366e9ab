use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tokio::runtime::Runtime;

use fieldintel_auth::{NewUser, User};
use fieldintel_core::UserId;
use fieldintel_infra::{InMemoryStore, InformationStore, UserStore};
use fieldintel_informations::{Information, InformationFilter, NewInformation};

const UNITS: [&str; 4] = ["CVS", "CNS", "ONCO", "DERM"];

fn seeded_store(rt: &Runtime, records: usize) -> (InMemoryStore, UserId) {
    let store = InMemoryStore::new();
    let owner = User::create(
        NewUser {
            email: Some("bench@example.com".to_string()),
            access_code: Some("bench-code".to_string()),
            ..NewUser::default()
        },
        Utc::now(),
    )
    .unwrap();
    rt.block_on(UserStore::insert(&store, &owner)).unwrap();

    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    for i in 0..records {
        let info = Information::create(
            owner.id,
            NewInformation {
                type_bu: Some(UNITS[i % UNITS.len()].to_string()),
                type_info: Some(if i % 2 == 0 { "Event" } else { "Study" }.to_string()),
                info_date: Some(format!("2024-{:02}-{:02}", 1 + i % 12, 1 + i % 28)),
                ..NewInformation::default()
            },
            base + Duration::seconds(i as i64),
        )
        .unwrap();
        rt.block_on(InformationStore::insert(&store, &info)).unwrap();
    }

    (store, owner.id)
}

fn bench_information_listing(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("information_listing");

    for records in [100usize, 1_000, 10_000] {
        let (store, owner) = seeded_store(&rt, records);
        group.throughput(Throughput::Elements(records as u64));

        group.bench_with_input(BenchmarkId::new("unfiltered", records), &records, |b, _| {
            let filter = InformationFilter::default();
            b.iter(|| {
                rt.block_on(InformationStore::list(&store, black_box(&filter)))
                    .unwrap()
            });
        });

        group.bench_with_input(
            BenchmarkId::new("unit_scoped", records),
            &records,
            |b, _| {
                let filter = InformationFilter {
                    business_units: Some(vec!["CVS".to_string()]),
                    ..InformationFilter::default()
                };
                b.iter(|| {
                    rt.block_on(InformationStore::list(&store, black_box(&filter)))
                        .unwrap()
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("owner_scoped", records),
            &records,
            |b, _| {
                let filter = InformationFilter::owned_by(owner);
                b.iter(|| {
                    rt.block_on(InformationStore::list(&store, black_box(&filter)))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_information_insert(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("information_insert");
    group.sample_size(1000);

    group.bench_function("single_record", |b| {
        let (store, owner) = seeded_store(&rt, 0);
        b.iter(|| {
            let info = Information::create(
                owner,
                NewInformation {
                    type_bu: Some("CVS".to_string()),
                    type_info: Some(black_box("Event".to_string())),
                    info_date: Some("2024-06-01".to_string()),
                    ..NewInformation::default()
                },
                Utc::now(),
            )
            .unwrap();
            rt.block_on(InformationStore::insert(&store, &info)).unwrap();
        });
    });

    group.finish();
}

fn bench_owner_join(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("owner_join");

    for records in [100usize, 1_000] {
        let (store, _) = seeded_store(&rt, records);
        group.throughput(Throughput::Elements(records as u64));

        group.bench_with_input(
            BenchmarkId::new("list_with_owner", records),
            &records,
            |b, _| {
                let filter = InformationFilter::default();
                b.iter(|| {
                    rt.block_on(store.list_with_owner(black_box(&filter)))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_information_listing,
    bench_information_insert,
    bench_owner_join
);
criterion_main!(benches);
