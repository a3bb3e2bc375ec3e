use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use quittung::core::*;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn classic(dir: &Path) -> InvoiceAllocator {
    InvoiceAllocator::new(
        CounterStore::new(dir.join("data").join("invoice_counter.txt")),
        ReceiptGeneration::Classic.numbering("LSK"),
    )
}

fn counter_content(alloc: &InvoiceAllocator) -> String {
    fs::read_to_string(alloc.store().path()).unwrap()
}

// --- Monotonicity ---

#[test]
fn fresh_store_counts_from_one() {
    let tmp = TempDir::new().unwrap();
    let alloc = classic(tmp.path());

    let issued: Vec<String> = (0..5)
        .map(|_| alloc.allocate_on(date(2025, 6, 2)).unwrap().to_string())
        .collect();
    assert_eq!(issued, ["LSK001", "LSK002", "LSK003", "LSK004", "LSK005"]);
    assert_eq!(counter_content(&alloc), "5");
}

#[test]
fn separate_allocators_share_the_file() {
    let tmp = TempDir::new().unwrap();
    classic(tmp.path()).allocate_on(date(2025, 6, 2)).unwrap();
    classic(tmp.path()).allocate_on(date(2025, 6, 2)).unwrap();
    let third = classic(tmp.path()).allocate_on(date(2025, 6, 2)).unwrap();
    assert_eq!(third.sequence(), 3);
}

#[test]
fn existing_counter_continues() {
    let tmp = TempDir::new().unwrap();
    let alloc = classic(tmp.path());
    fs::create_dir_all(tmp.path().join("data")).unwrap();
    fs::write(alloc.store().path(), "41\n").unwrap();

    assert_eq!(alloc.allocate_on(date(2025, 6, 2)).unwrap().as_str(), "LSK042");
    assert_eq!(counter_content(&alloc), "42");
}

#[test]
fn threads_never_share_a_number() {
    let tmp = TempDir::new().unwrap();
    let alloc = classic(tmp.path());

    let mut seen: Vec<u64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    (0..10)
                        .map(|_| alloc.allocate_on(date(2025, 6, 2)).unwrap().sequence())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });
    seen.sort_unstable();
    assert_eq!(seen, (1..=40).collect::<Vec<_>>());
    assert_eq!(counter_content(&alloc), "40");
}

#[test]
fn threads_with_own_allocators_never_share_a_number() {
    let tmp = TempDir::new().unwrap();

    let mut seen: Vec<u64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    let alloc = classic(tmp.path());
                    (0..50)
                        .map(|_| alloc.allocate_on(date(2025, 6, 2)).unwrap().sequence())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });
    seen.sort_unstable();
    assert_eq!(seen, (1..=200).collect::<Vec<_>>());
    assert_eq!(counter_content(&classic(tmp.path())), "200");
}

// --- Bootstrap ---

#[test]
fn missing_store_and_directory_are_created() {
    let tmp = TempDir::new().unwrap();
    let alloc = InvoiceAllocator::new(
        CounterStore::new(tmp.path().join("a").join("b").join("counter.txt")),
        ReceiptGeneration::Classic.numbering("LSK"),
    );
    let n = alloc.allocate_on(date(2025, 6, 2)).unwrap();
    assert_eq!(n.as_str(), "LSK001");
    assert_eq!(n.sequence(), 1);
    assert_eq!(counter_content(&alloc), "1");
}

// --- Self-healing ---

fn assert_heals(content: &[u8]) {
    let tmp = TempDir::new().unwrap();
    let alloc = classic(tmp.path());
    fs::create_dir_all(tmp.path().join("data")).unwrap();
    fs::write(alloc.store().path(), content).unwrap();

    let n = alloc.allocate_on(date(2025, 6, 2)).unwrap();
    assert_eq!(n.as_str(), "LSK001", "content {content:?}");
    assert_eq!(counter_content(&alloc), "1");

    // and counting resumes normally afterwards
    assert_eq!(alloc.allocate_on(date(2025, 6, 2)).unwrap().sequence(), 2);
}

#[test]
fn non_numeric_store_resets() {
    assert_heals(b"abc");
}

#[test]
fn negative_store_resets() {
    assert_heals(b"-5");
}

#[test]
fn empty_store_resets() {
    assert_heals(b"");
}

#[test]
fn fractional_store_resets() {
    assert_heals(b"12.5");
}

#[test]
fn binary_store_resets() {
    assert_heals(&[0xff, 0xfe, 0x00, 0x31]);
}

// --- Year-prefixed numbering ---

#[test]
fn modern_numbers_take_year_from_allocation_date() {
    let tmp = TempDir::new().unwrap();
    let alloc = InvoiceAllocator::new(
        CounterStore::new(tmp.path().join("counter.txt")),
        ReceiptGeneration::Modern.numbering("LSK"),
    );
    assert_eq!(
        alloc.allocate_on(date(2025, 12, 31)).unwrap().as_str(),
        "LSK25-00001"
    );
    // the year is not stored; the sequence carries on across years
    assert_eq!(
        alloc.allocate_on(date(2026, 1, 1)).unwrap().as_str(),
        "LSK26-00002"
    );
    assert_eq!(counter_content(&alloc), "2");
}

#[test]
fn allocate_next_uses_today() {
    let tmp = TempDir::new().unwrap();
    let alloc = InvoiceAllocator::new(
        CounterStore::new(tmp.path().join("counter.txt")),
        ReceiptGeneration::Modern.numbering("R"),
    );
    let n = alloc.allocate_next().unwrap();
    let parsed = alloc.scheme().parse(n.as_str()).unwrap();
    assert_eq!(parsed.sequence(), 1);
}

// --- Failures ---

#[test]
fn unwritable_location_is_storage_error() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "i am a file").unwrap();

    let alloc = InvoiceAllocator::new(
        CounterStore::new(blocker.join("counter.txt")),
        ReceiptGeneration::Classic.numbering("LSK"),
    );
    let err = alloc.allocate_on(date(2025, 6, 2)).unwrap_err();
    assert!(matches!(err, BillingError::Storage { .. }), "got {err:?}");
    assert!(err.to_string().contains("counter store"));
}

#[test]
fn failed_allocation_issues_nothing() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let alloc = InvoiceAllocator::new(
        CounterStore::new(blocker.join("counter.txt")),
        ReceiptGeneration::Classic.numbering("LSK"),
    );
    assert!(alloc.allocate_on(date(2025, 6, 2)).is_err());
    assert!(alloc.allocate_on(date(2025, 6, 2)).is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "");
}
