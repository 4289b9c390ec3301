//! Label layout micro-benchmarks
//!
//! Measures the font-fit search on its own and whole sheets through the
//! lopdf backend.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use labelsheet::{
    ItemSummary, LabelRecord, PipelineBuilder, SheetConfig, ShippingKey, compose_label,
};
use labelsheet_layout::{FitSettings, StandardFonts, fit_text};
use labelsheet_types::Size;
use std::hint::black_box;

fn record(i: usize, street: &str) -> LabelRecord {
    LabelRecord {
        order_id: Some(format!("#{}", 1000 + i).into()),
        shipping: ShippingKey {
            name: format!("Customer Number {}", i),
            street: street.to_string(),
            city: "Springfield".to_string(),
            zip: format!("{:05}", i),
            province: "IL".to_string(),
            phone: format!("555{:07}", i),
        },
        items: ItemSummary::Total((i % 7) as u64 + 1),
    }
}

fn benchmark_fit_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_text");
    let bounds = Size::from_mm(89.0, 39.0);
    let cases = [
        ("short", "12 Main St"),
        (
            "long",
            "Avenida Engenheiro Duarte Pacheco, Torre Amoreiras, Piso Dezassete, Sala Quatro, Frente Esquerdo, Edificio Norte",
        ),
    ];

    for (name, street) in cases {
        let text = compose_label(&record(1, street));
        group.bench_with_input(BenchmarkId::new("street", name), &text, |b, text| {
            b.iter(|| {
                black_box(fit_text(
                    black_box(text),
                    bounds,
                    &FitSettings::default(),
                    &StandardFonts,
                ))
            });
        });
    }
    group.finish();
}

fn benchmark_render_sheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_sheet");
    let pipeline = PipelineBuilder::new()
        .with_config(SheetConfig::twelve_up())
        .build()
        .expect("preset is valid");

    for count in [12usize, 120, 1200] {
        let records: Vec<_> = (0..count).map(|i| record(i, "742 Evergreen Terrace")).collect();
        group.bench_with_input(BenchmarkId::new("labels", count), &records, |b, records| {
            b.iter(|| black_box(pipeline.render(records).expect("render succeeds")));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_fit_text, benchmark_render_sheet);
criterion_main!(benches);
