//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite verifies that the engine meets its targets:
//! - Tiering a single total: < 1μs mean
//! - Evaluating one entry against the shipped ruleset: < 10μs mean
//! - Compiling one employee-week: < 100μs mean
//! - Compiling a batch of 100 employees: < 10ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use payroll_engine::calculation::{PayrollCompiler, RuleContext, RuleEngine, tier};
use payroll_engine::config::ConfigLoader;
use payroll_engine::ledger::TimeLedger;
use payroll_engine::models::{Employee, PayPeriod, TimeEntry};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
        .unwrap()
}

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config").expect("Failed to load config")
}

fn employee(id: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {id}"),
        role: "nurse".to_string(),
        base_hourly_rate: dec("40"),
        is_active: true,
    }
}

fn january_week() -> PayPeriod {
    PayPeriod {
        start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
    }
}

fn closed_entry(employee_id: &str, date: &str, start: &str, end: &str) -> TimeEntry {
    let mut entry = TimeEntry::open(employee_id, make_datetime(date, start));
    entry.close(make_datetime(date, end)).unwrap();
    entry
}

/// Ledger with one full week for each of `count` employees.
fn week_ledger(count: usize) -> TimeLedger {
    let mut ledger = TimeLedger::new();
    for i in 0..count {
        let id = format!("emp_{i:03}");
        for date in [
            "2026-01-12",
            "2026-01-13",
            "2026-01-14",
            "2026-01-15",
            "2026-01-16",
        ] {
            ledger
                .finalize(closed_entry(&id, date, "09:00:00", "17:00:00"))
                .unwrap();
        }
    }
    ledger
}

/// Benchmark: overtime tiering arithmetic.
fn bench_tier(c: &mut Criterion) {
    let threshold = dec("8");
    let span = dec("8");

    c.bench_function("tier_single_total", |b| {
        b.iter(|| black_box(tier(black_box(dec("12.75")), threshold, span)))
    });
}

/// Benchmark: evaluating one entry against the shipped ruleset.
fn bench_evaluate_entry(c: &mut Criterion) {
    let loader = load_config();
    let engine = RuleEngine::new(loader.ruleset().clone());
    let entry = closed_entry("emp_001", "2026-01-17", "23:00:00", "23:59:00");
    let ctx = RuleContext {
        employee_id: "emp_001".to_string(),
        role: "charge_nurse".to_string(),
    };

    c.bench_function("evaluate_entry", |b| {
        b.iter(|| black_box(engine.evaluate(black_box(&entry), &ctx)))
    });
}

/// Benchmark: compiling one employee-week.
fn bench_compile_week(c: &mut Criterion) {
    let loader = load_config();
    let compiler = PayrollCompiler::new(
        RuleEngine::new(loader.ruleset().clone()),
        loader.pay_codes().clone(),
        loader.compiler_config(),
    );
    let ledger = week_ledger(1);
    let employee = employee("emp_000");
    let period = january_week();

    c.bench_function("compile_employee_week", |b| {
        b.iter(|| black_box(compiler.compile(&ledger, &employee, &period).unwrap()))
    });
}

/// Benchmark: batch compilation at several batch sizes.
fn bench_compile_batch(c: &mut Criterion) {
    let loader = load_config();
    let compiler = PayrollCompiler::new(
        RuleEngine::new(loader.ruleset().clone()),
        loader.pay_codes().clone(),
        loader.compiler_config(),
    );
    let period = january_week();

    let mut group = c.benchmark_group("batch_compilation");
    for count in [10usize, 100] {
        let ledger = week_ledger(count);
        let employees: Vec<Employee> =
            (0..count).map(|i| employee(&format!("emp_{i:03}"))).collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &count, |b, _| {
            b.iter(|| black_box(compiler.compile_many(&ledger, &employees, &period)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_tier,
    bench_evaluate_entry,
    bench_compile_week,
    bench_compile_batch,
);
criterion_main!(benches);
