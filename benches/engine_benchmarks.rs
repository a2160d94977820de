//! Performance benchmarks for the scheduling and closing engine.
//!
//! Covers the two hot paths: batch shift generation (a month-long roster per
//! run) and ledger throughput (sequential entry recording with the overlap
//! scan on every add).
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tokio::runtime::Runtime;
use uuid::Uuid;

use closing_engine::config::SchedulePolicy;
use closing_engine::engine::{GenerateShifts, NewEntry, RevenueLedger, ShiftGenerator};
use closing_engine::models::{
    Caller, EntryOrigin, PaymentMethod, Role, ScheduleKind, WorkScheduleTemplate,
};
use closing_engine::repository::InMemoryStore;

async fn seeded_store(tenant_id: Uuid, unit_id: Uuid, user_id: Uuid) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.add_unit(unit_id, tenant_id, &[user_id]).await;
    store
}

fn generation_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("shift_generation");

    for user_count in [1usize, 10, 50] {
        group.bench_with_input(
            BenchmarkId::new("month_roster", user_count),
            &user_count,
            |b, &user_count| {
                b.to_async(&rt).iter(|| async move {
                    let tenant_id = Uuid::new_v4();
                    let unit_id = Uuid::new_v4();
                    let caller = Caller::new(Uuid::new_v4(), tenant_id, Role::Manager);
                    let store = seeded_store(tenant_id, unit_id, caller.user_id).await;

                    let template_id = Uuid::new_v4();
                    store
                        .add_template(WorkScheduleTemplate {
                            id: template_id,
                            tenant_id,
                            unit_id,
                            name: "bench roster".to_string(),
                            kind: ScheduleKind::Weekday,
                            starts_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                            ends_at: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                        })
                        .await;

                    let generator = ShiftGenerator::new(store, SchedulePolicy::default());
                    let outcome = generator
                        .generate(
                            &GenerateShifts {
                                unit_id,
                                template_id,
                                start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                                end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
                                user_ids: (0..user_count).map(|_| Uuid::new_v4()).collect(),
                            },
                            &caller,
                        )
                        .await
                        .expect("generation succeeds");
                    outcome.created.len()
                });
            },
        );
    }
    group.finish();
}

fn ledger_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("revenue_ledger");

    for entry_count in [10usize, 100] {
        group.bench_with_input(
            BenchmarkId::new("sequential_adds", entry_count),
            &entry_count,
            |b, &entry_count| {
                b.to_async(&rt).iter(|| async move {
                    let tenant_id = Uuid::new_v4();
                    let unit_id = Uuid::new_v4();
                    let caller = Caller::new(Uuid::new_v4(), tenant_id, Role::Employee);
                    let store = seeded_store(tenant_id, unit_id, caller.user_id).await;
                    let ledger = RevenueLedger::new(store.clone(), store);

                    let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
                    for i in 0..entry_count {
                        let start = day
                            .and_time(NaiveTime::MIN)
                            + chrono::Duration::minutes(i as i64 * 10);
                        let end = start + chrono::Duration::minutes(10);
                        ledger
                            .add(
                                unit_id,
                                NewEntry {
                                    amount: Decimal::new(1000 + i as i64, 2),
                                    start,
                                    end,
                                    payment_method: PaymentMethod::Cash,
                                    origin: EntryOrigin::Manual,
                                },
                                &caller,
                            )
                            .await
                            .expect("add succeeds");
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, generation_benchmark, ledger_benchmark);
criterion_main!(benches);
