//! Performance benchmarks for ferro-m2mc
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- lookup

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_m2mc::convert::{AnchorRescaler, ArmAwareLookup, MapAnchors};
use ferro_m2mc::{
    parse_locus_str, ArmMode, CalibrationRow, CalibrationTable, ColumnLayout, Direction, Locus,
    LocusBatchConverter,
};

/// Synthetic table with `rows_per_arm` rows on each side of the centromere.
fn synthetic_table(rows_per_arm: usize) -> CalibrationTable {
    let n = rows_per_arm as f64;
    let short = (0..rows_per_arm).map(|i| {
        let i = i as f64;
        CalibrationRow::new(i, 1.0 - i / n, i * 0.4)
    });
    let centromere = std::iter::once(CalibrationRow::new(n, 0.0, n * 0.4));
    let long = (1..=rows_per_arm).map(|i| {
        let i = i as f64;
        CalibrationRow::new(n + i, i / n, (n + i) * 0.4)
    });
    CalibrationTable::new("1", short.chain(centromere).chain(long).collect()).unwrap()
}

fn genetic_loci(count: usize, max: f64) -> Vec<Locus> {
    let mut loci: Vec<Locus> = (0..count)
        .map(|i| Locus::new(format!("l{}", i), max * i as f64 / count as f64))
        .collect();
    loci.push(Locus::new("cent1", max / 2.0));
    loci.sort_by(|a, b| a.position.total_cmp(&b.position));
    loci
}

fn cytological_loci(count: usize) -> Vec<Locus> {
    let half = count / 2;
    let short = (0..half).map(|i| Locus::new(format!("s{}", i), 1.0 - i as f64 / half as f64));
    let long = (1..=half).map(|i| Locus::new(format!("l{}", i), i as f64 / half as f64));
    short
        .chain(std::iter::once(Locus::new("cent1", 0.0)))
        .chain(long)
        .collect()
}

// =============================================================================
// Lookup benchmarks
// =============================================================================

/// Benchmark single lookups by table size
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for rows in [50usize, 200, 1000] {
        let table = synthetic_table(rows);
        let lookup = ArmAwareLookup::new(&table);
        let mid = rows as f64 * 0.5;

        group.bench_with_input(BenchmarkId::new("cm_to_physical", rows), &mid, |b, q| {
            b.iter(|| lookup.cm_to_physical(black_box(*q)))
        });
        group.bench_with_input(
            BenchmarkId::new("cytological_to_genetic", rows),
            &0.37,
            |b, q| b.iter(|| lookup.cytological_to_genetic(black_box(*q), ArmMode::Long)),
        );
    }

    group.finish();
}

/// Benchmark the anchor rescale
fn bench_rescale(c: &mut Criterion) {
    let rescaler = AnchorRescaler::new(
        MapAnchors::new(-4.0, 62.0, 180.0),
        MapAnchors::new(0.0, 55.0, 170.0),
    );
    c.bench_function("rescale", |b| {
        b.iter(|| {
            (0..100)
                .map(|i| rescaler.rescale(black_box(i as f64 * 1.8)).rn_position)
                .sum::<f64>()
        })
    });
}

// =============================================================================
// Batch benchmarks
// =============================================================================

/// Benchmark whole-list conversion in both directions
fn bench_batch(c: &mut Criterion) {
    let table = synthetic_table(200);
    let converter = LocusBatchConverter::new(&table);
    let mut group = c.benchmark_group("batch");

    for count in [10usize, 100, 1000] {
        let genetic = genetic_loci(count, 400.0);
        let cytological = cytological_loci(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("genetic", count), &genetic, |b, loci| {
            b.iter(|| converter.convert(black_box(loci), Direction::GeneticToPhysical))
        });
        group.bench_with_input(
            BenchmarkId::new("cytological", count),
            &cytological,
            |b, loci| b.iter(|| converter.convert(black_box(loci), Direction::CytologicalToGenetic)),
        );
    }

    group.finish();
}

// =============================================================================
// Parsing benchmarks
// =============================================================================

/// Benchmark locus list and table parsing throughput
fn bench_parsing(c: &mut Criterion) {
    let list: String = (0..1000)
        .map(|i| format!("locus{}\t{:.2}\n", i, i as f64 * 0.17))
        .collect();
    let table: String = synthetic_table(500)
        .rows()
        .iter()
        .map(|r| format!("{}\t{}\t{}\n", r.genetic, r.cytological, r.physical))
        .collect();

    let mut group = c.benchmark_group("parsing");

    group.throughput(Throughput::Bytes(list.len() as u64));
    group.bench_function("locus_list", |b| b.iter(|| parse_locus_str(black_box(&list))));

    group.throughput(Throughput::Bytes(table.len() as u64));
    group.bench_function("calibration_table", |b| {
        b.iter(|| {
            CalibrationTable::parse("1", black_box(table.as_bytes()), ColumnLayout::GeneticFirst)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_rescale, bench_batch, bench_parsing);

criterion_main!(benches);
