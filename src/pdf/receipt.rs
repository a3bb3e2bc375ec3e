use std::fs;
use std::path::{Path, PathBuf};

use super::fonts::Face;
use super::layout::{Align, Cell, PageWriter};
use super::logo::Logo;
use crate::core::{
    BillingError, Footer, InvoiceNumber, InvoiceRecord, Organization, PageLayout, format_amount,
};

/// Receipt date format, e.g. `02-06-2025`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

pub const SIGNATURE_LEFT: &str = "Sign & Stamp (Principal)";
pub const SIGNATURE_RIGHT: &str = "Sign (Parent/Guardian)";
pub const DISCLAIMER: &str =
    "This is a computer-generated receipt and does not require a signature.";

// Column widths of the particulars table, in mm. The amount column takes
// the rest of the line.
const SR_WIDTH: f32 = 10.0;
const PARTICULARS_WIDTH: f32 = 100.0;

/// Static presentation shared by every receipt of a deployment.
#[derive(Debug, Clone)]
pub struct ReceiptStyle {
    pub organization: Organization,
    pub footer: Footer,
    pub logo: Option<PathBuf>,
    pub layout: PageLayout,
}

impl ReceiptStyle {
    pub fn from_config(config: &crate::core::BillingConfig) -> Self {
        Self {
            organization: config.organization.clone(),
            footer: config.generation.footer(),
            logo: config.logo.clone(),
            layout: config.layout,
        }
    }
}

/// Render `record` as `<number>.pdf` inside `folder` and return the file path.
///
/// The folder is created if needed and an existing file of the same name is
/// replaced. The record's total is printed as given, never recomputed from
/// the lines.
pub fn render_receipt(
    record: &InvoiceRecord,
    number: &InvoiceNumber,
    folder: &Path,
    style: &ReceiptStyle,
) -> Result<PathBuf, BillingError> {
    fs::create_dir_all(folder).map_err(|e| BillingError::render(folder, e))?;
    let path = folder.join(number.file_name());

    let bytes = render_to_bytes(record, number, style)
        .map_err(|reason| BillingError::render(&path, reason))?;
    fs::write(&path, bytes).map_err(|e| BillingError::render(&path, e))?;

    tracing::info!(
        invoice_number = %number,
        path = %path.display(),
        lines = record.lines.len(),
        "receipt written"
    );
    Ok(path)
}

/// Render `record` into PDF bytes without touching the filesystem
/// (other than reading the logo).
pub fn render_to_bytes(
    record: &InvoiceRecord,
    number: &InvoiceNumber,
    style: &ReceiptStyle,
) -> Result<Vec<u8>, lopdf::Error> {
    let mut page = PageWriter::new(style.layout);

    if let Some(logo) = style.logo.as_deref().and_then(Logo::load) {
        let margin = style.layout.margin_mm;
        page.logo(logo, margin, margin, style.layout.logo_width_mm);
    }

    write_header(&mut page, &style.organization);
    page.ln(10.0);
    write_student(&mut page, record, number);
    page.ln(5.0);
    write_particulars(&mut page, record);
    page.ln(5.0);
    write_payment(&mut page, record);
    write_footer(&mut page, style.footer);
    tracing::debug!(invoice_number = %number, pages = page.page_count(), "receipt laid out");

    let mut doc = page.finish(number.as_str())?;
    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn write_header(page: &mut PageWriter, org: &Organization) {
    page.set_font(Face::Bold, 16.0);
    page.cell(Cell::new(0.0, 10.0, &org.name).align(Align::Center).ln());
    page.set_font(Face::Regular, 12.0);
    page.cell(Cell::new(0.0, 8.0, &org.address).align(Align::Center).ln());
    for line in &org.contact_lines {
        page.cell(Cell::new(0.0, 8.0, line).align(Align::Center).ln());
    }
}

fn write_student(page: &mut PageWriter, record: &InvoiceRecord, number: &InvoiceNumber) {
    page.set_font(Face::Bold, 12.0);
    let receipt_no = format!("Receipt No: {number}");
    let date = format!("Date: {}", record.issue_date.format(DATE_FORMAT));
    page.cell(Cell::new(100.0, 10.0, &receipt_no));
    page.cell(Cell::new(0.0, 10.0, &date).align(Align::Right).ln());

    page.set_font(Face::Regular, 12.0);
    for line in [
        format!("Name of Student: {}", record.student_name),
        format!("Course: {}", record.course),
        format!("Course Duration: {}", record.duration),
    ] {
        page.cell(Cell::new(0.0, 10.0, &line).ln());
    }
}

fn write_particulars(page: &mut PageWriter, record: &InvoiceRecord) {
    page.set_font(Face::Bold, 12.0);
    page.cell(Cell::new(SR_WIDTH, 10.0, "Sr").bordered());
    page.cell(Cell::new(PARTICULARS_WIDTH, 10.0, "Particulars").bordered());
    page.cell(Cell::new(0.0, 10.0, "Amount").bordered().ln());

    page.set_font(Face::Regular, 12.0);
    for (i, item) in record.lines.iter().enumerate() {
        let sr = (i + 1).to_string();
        let amount = format_amount(item.amount);
        page.cell(Cell::new(SR_WIDTH, 10.0, &sr).bordered());
        page.cell(Cell::new(PARTICULARS_WIDTH, 10.0, &item.label).bordered());
        page.cell(Cell::new(0.0, 10.0, &amount).bordered().ln());
    }

    page.set_font(Face::Bold, 12.0);
    let total = format_amount(record.total);
    page.cell(Cell::new(SR_WIDTH + PARTICULARS_WIDTH, 10.0, "Total").bordered());
    page.cell(Cell::new(0.0, 10.0, &total).bordered().ln());
}

fn write_payment(page: &mut PageWriter, record: &InvoiceRecord) {
    page.set_font(Face::Regular, 12.0);
    let mode = format!("Payment Mode: {}", record.payment_mode);
    let balance = format!("Balance (if any): {}", format_amount(record.balance));
    page.cell(Cell::new(0.0, 10.0, &mode).ln());
    page.cell(Cell::new(0.0, 10.0, &balance).ln());
}

fn write_footer(page: &mut PageWriter, footer: Footer) {
    page.ln(20.0);
    page.set_font(Face::Regular, 12.0);
    match footer {
        Footer::Signatures => {
            page.cell(Cell::new(95.0, 10.0, SIGNATURE_LEFT));
            page.cell(Cell::new(0.0, 10.0, SIGNATURE_RIGHT).align(Align::Right).ln());
        }
        Footer::Disclaimer => {
            page.set_font(Face::Regular, 10.0);
            page.cell(Cell::new(0.0, 10.0, DISCLAIMER).align(Align::Center).ln());
        }
    }
}
