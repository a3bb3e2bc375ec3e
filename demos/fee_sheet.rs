use chrono::Local;
use quittung::{Biller, BillingConfig, FeeSheet, InvoiceRecordBuilder, ReceiptGeneration};
use rust_decimal_macros::dec;

fn main() {
    // Fill in fees the way the front-desk form does: standard fees first,
    // then a custom one, then drop a row again.
    let mut sheet = FeeSheet::new();
    let admission = sheet.add_standard().expect("catalogue not exhausted");
    let tuition = sheet.add_standard().expect("catalogue not exhausted");
    let exam = sheet.add_standard().expect("catalogue not exhausted");
    let transport = sheet.add_custom("Transport");
    sheet.set_amount(admission, dec!(5000));
    sheet.set_amount(tuition, dec!(12000));
    sheet.set_amount(exam, dec!(800));
    sheet.set_amount(transport, dec!(2400));
    sheet.remove(exam);

    println!("Still available:");
    for fee in sheet.remaining() {
        println!("  {fee}");
    }
    println!("Sheet total: {}", quittung::format_amount(sheet.sum()));

    let biller = Biller::new(BillingConfig {
        generation: ReceiptGeneration::Modern,
        counter_path: std::env::temp_dir().join("quittung-demo").join("counter.txt"),
        output_dir: Some(std::env::temp_dir().join("quittung-demo").join("Invoices")),
        ..Default::default()
    });

    let record = InvoiceRecordBuilder::new("Diya Patel", "Nursery", "1 year", Local::now().date_naive())
        .fees(sheet)
        .destination(biller.config().default_output_dir())
        .build()
        .expect("record should be valid");

    let number = biller
        .allocate_next_invoice_number()
        .expect("counter store should be writable");
    let path = biller.render(&record, &number).expect("receipt should render");
    println!("{number} -> {}", path.display());
}
