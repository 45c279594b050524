//! Import pipeline benchmarks.
//!
//! Measures end-to-end import throughput and mapper detection cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hopper::{mapping, ImportOptions, Importer, SchemaKind, DEFAULT_SIMILARITY_THRESHOLD};

/// Generate a synthetic location-layout CSV with the given number of rows.
fn generate_location_csv(rows: usize) -> Vec<u8> {
    let mut data = String::from(
        "Locatie,Omschrijving,Zone,Gang,Vak,Niveau,Capacity Layout,Max Gewicht,Notes\n",
    );
    for row in 0..rows {
        data.push_str(&format!(
            "{zone}-{aisle:02}-{bay:02},Rack {row},{zone},{aisle},{bay},{level},0.25-0.25-0.25-0.25,{weight},note {row}\n",
            zone = ["A", "B", "C"][row % 3],
            aisle = row / 100,
            bay = row % 100,
            level = row % 4 + 1,
            weight = 800 + row % 400,
        ));
    }
    data.into_bytes()
}

/// Benchmark full imports across sheet sizes.
fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");

    for rows in [1_000, 10_000, 100_000].iter() {
        let bytes = generate_location_csv(*rows);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &bytes, |b, bytes| {
            let importer = Importer::with_options(ImportOptions {
                schema_kind: Some(SchemaKind::Location),
                ..Default::default()
            });
            b.iter(|| {
                let report = importer.import(black_box(bytes)).unwrap();
                black_box(report.processed_rows)
            });
        });
    }

    group.finish();
}

/// Benchmark column auto-detection alone.
fn bench_detect(c: &mut Criterion) {
    let headers: Vec<String> = [
        "Locatie Code",
        "Omschrijving",
        "Zone",
        "Gang",
        "Vak",
        "Niveau",
        "Capaciteits-indeling",
        "Max. Gewicht (kg)",
        "Notes",
        "Laatst gewijzigd",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    c.bench_function("detect_both_templates", |b| {
        b.iter(|| {
            let report = mapping::detect(black_box(&headers), DEFAULT_SIMILARITY_THRESHOLD);
            black_box(report.confidence)
        });
    });
}

criterion_group!(benches, bench_import, bench_detect);
criterion_main!(benches);
