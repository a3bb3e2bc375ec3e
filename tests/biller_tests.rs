#![cfg(feature = "pdf")]

use std::fs;
use std::path::Path;

use chrono::Local;
use quittung::{Biller, BillingConfig, BillingError, InvoiceRecord, InvoiceRecordBuilder, ReceiptGeneration};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn biller(dir: &Path, generation: ReceiptGeneration) -> Biller {
    Biller::new(BillingConfig {
        generation,
        counter_path: dir.join("data").join("invoice_counter.txt"),
        ..Default::default()
    })
}

fn record(destination: &Path) -> InvoiceRecord {
    InvoiceRecordBuilder::new("Aarav Shah", "Nursery", "1 year", Local::now().date_naive())
        .add_line("Tuition Fee", dec!(12000))
        .destination(destination)
        .build()
        .unwrap()
}

#[test]
fn generate_invoice_allocates_and_renders() {
    let tmp = TempDir::new().unwrap();
    let b = biller(tmp.path(), ReceiptGeneration::Classic);
    let out = tmp.path().join("Invoices");

    let first = b.generate_invoice(record(&out)).unwrap();
    let second = b.generate_invoice(record(&out)).unwrap();
    assert_eq!(first, out.join("LSK001.pdf"));
    assert_eq!(second, out.join("LSK002.pdf"));
    assert!(first.exists() && second.exists());
    assert_eq!(b.allocator().current().unwrap(), Some(2));
}

#[test]
fn explicit_allocation_then_render() {
    let tmp = TempDir::new().unwrap();
    let b = biller(tmp.path(), ReceiptGeneration::Modern);

    let number = b.allocate_next_invoice_number().unwrap();
    assert_eq!(number.sequence(), 1);
    assert!(number.as_str().starts_with("LSK"));
    assert!(number.as_str().ends_with("-00001"));

    let path = b.render(&record(tmp.path()), &number).unwrap();
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), number.file_name());
}

#[test]
fn invalid_record_consumes_no_number() {
    let tmp = TempDir::new().unwrap();
    let b = biller(tmp.path(), ReceiptGeneration::Classic);

    let mut bad = record(tmp.path());
    bad.lines.clear();
    let err = b.generate_invoice(bad).unwrap_err();
    assert!(matches!(err, BillingError::InvalidInput(_)));
    assert_eq!(b.allocator().current().unwrap(), None);
    assert!(!b.allocator().store().path().exists());
}

#[test]
fn render_failure_burns_the_number() {
    let tmp = TempDir::new().unwrap();
    let b = biller(tmp.path(), ReceiptGeneration::Classic);
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let err = b.generate_invoice(record(&blocker.join("out"))).unwrap_err();
    assert!(matches!(err, BillingError::Render { .. }));
    assert_eq!(b.allocator().current().unwrap(), Some(1));

    // the next receipt does not reuse the burned number
    let out = tmp.path().join("out");
    let path = b.generate_invoice(record(&out)).unwrap();
    assert_eq!(path, out.join("LSK002.pdf"));
}

#[test]
fn storage_failure_renders_nothing() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let b = Biller::new(BillingConfig {
        counter_path: blocker.join("counter.txt"),
        ..Default::default()
    });

    let out = tmp.path().join("out");
    let err = b.generate_invoice(record(&out)).unwrap_err();
    assert!(matches!(err, BillingError::Storage { .. }));
    assert!(!out.exists());
}

#[test]
fn config_file_drives_the_biller() {
    let tmp = TempDir::new().unwrap();
    let counter = tmp.path().join("counter.txt");
    let config_path = tmp.path().join("billing.toml");
    fs::write(
        &config_path,
        format!(
            "generation = \"modern\"\nprefix = \"SA\"\ncounter_path = {:?}\n",
            counter.display().to_string()
        ),
    )
    .unwrap();

    let b = Biller::new(BillingConfig::from_file(&config_path).unwrap());
    let n = b.allocate_next_invoice_number().unwrap();
    assert!(n.as_str().starts_with("SA"));
    assert_eq!(fs::read_to_string(counter).unwrap(), "1");
}
