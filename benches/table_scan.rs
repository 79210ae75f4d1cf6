//! Benchmark suite for the predicate scan.
//!
//! Compares the three segment representations on the same data:
//! - value chunks (linear comparator sweep)
//! - dictionary chunks (bound planning + value-id sweep)
//! - reference input (row-id chase into the base table)
//!
//! Run: cargo bench --bench table_scan

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use opal::{DataType, Operator, ScanType, Table, TableScan, TableWrapper, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CHUNK_SIZE: u32 = 10_000;

/// Table of `row_count` ints cycling through `distinct` values.
fn build_table(row_count: usize, distinct: i32) -> Arc<Table> {
    let mut table = Table::new(CHUNK_SIZE);
    table.add_column("a", DataType::Int).unwrap();
    for i in 0..row_count {
        table.append(vec![Value::Int(i as i32 % distinct)]).unwrap();
    }
    Arc::new(table)
}

fn compress_full_chunks(table: &Table) {
    for chunk_id in 0..table.chunk_count() {
        if table.get_chunk(chunk_id).size() == table.chunk_size() as usize {
            table.compress_chunk(chunk_id).unwrap();
        }
    }
}

fn run_scan(table: &Arc<Table>, scan_type: ScanType, search: i32) -> u64 {
    let scan = TableScan::new(
        Arc::new(TableWrapper::new(Arc::clone(table))),
        0,
        scan_type,
        Value::Int(search),
    );
    scan.execute().unwrap().row_count()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_value_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_scan");
    for &rows in &[10_000usize, 100_000] {
        let table = build_table(rows, 1_000);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| run_scan(black_box(table), ScanType::LessThan, 500));
        });
    }
    group.finish();
}

fn bench_dictionary_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary_scan");
    for &rows in &[10_000usize, 100_000] {
        let table = build_table(rows, 1_000);
        compress_full_chunks(&table);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| run_scan(black_box(table), ScanType::LessThan, 500));
        });
    }
    group.finish();
}

fn bench_dictionary_point_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary_equals");
    for &distinct in &[100, 10_000] {
        let table = build_table(100_000, distinct);
        compress_full_chunks(&table);
        group.bench_with_input(
            BenchmarkId::from_parameter(distinct),
            &table,
            |b, table| {
                b.iter(|| run_scan(black_box(table), ScanType::Equals, distinct / 2));
            },
        );
    }
    group.finish();
}

fn bench_reference_scan(c: &mut Criterion) {
    let table = build_table(100_000, 1_000);
    let half = TableScan::new(
        Arc::new(TableWrapper::new(Arc::clone(&table))),
        0,
        ScanType::LessThan,
        Value::Int(500),
    )
    .execute()
    .unwrap();

    c.bench_function("reference_scan/50k", |b| {
        b.iter(|| run_scan(black_box(&half), ScanType::GreaterThanEquals, 250));
    });
}

criterion_group!(
    benches,
    bench_value_scan,
    bench_dictionary_scan,
    bench_dictionary_point_lookup,
    bench_reference_scan
);
criterion_main!(benches);
