use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;
use tempfile::TempDir;

use quittung::core::*;
use quittung::pdf::{self, ReceiptStyle};

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn build_record(lines: usize) -> InvoiceRecord {
    let mut builder = InvoiceRecordBuilder::new("Bench Student", "Nursery", "1 year", test_date())
        .payment_mode(PaymentMode::Cash)
        .destination("bench-out");
    for i in 1..=lines {
        builder = builder.add_line(format!("Item {i}"), dec!(99.99));
    }
    builder.build().unwrap()
}

fn bench_allocate(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    let alloc = InvoiceAllocator::new(
        CounterStore::new(tmp.path().join("counter.txt")),
        ReceiptGeneration::Classic.numbering("LSK"),
    );
    c.bench_function("allocate_next", |b| {
        b.iter(|| black_box(alloc.allocate_on(test_date()).unwrap()));
    });
}

fn bench_render_short(c: &mut Criterion) {
    let record = build_record(3);
    let number = ReceiptGeneration::Classic.numbering("LSK").format(1, test_date());
    let style = ReceiptStyle::from_config(&BillingConfig::default());
    c.bench_function("render_3_lines", |b| {
        b.iter(|| black_box(pdf::render_to_bytes(black_box(&record), &number, &style)));
    });
}

fn bench_render_1000_lines(c: &mut Criterion) {
    let record = build_record(1000);
    let number = ReceiptGeneration::Modern.numbering("LSK").format(1, test_date());
    let style = ReceiptStyle::from_config(&BillingConfig {
        generation: ReceiptGeneration::Modern,
        ..Default::default()
    });
    c.bench_function("render_1000_lines", |b| {
        b.iter(|| black_box(pdf::render_to_bytes(black_box(&record), &number, &style)));
    });
}

criterion_group!(
    benches,
    bench_allocate,
    bench_render_short,
    bench_render_1000_lines,
);
criterion_main!(benches);
