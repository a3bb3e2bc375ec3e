use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::BillingError;
use super::fees::FeeSheet;
use super::types::*;
use super::validation;

/// Builder for receipt records.
///
/// ```
/// use quittung::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let record = InvoiceRecordBuilder::new(
///     "Aarav Shah",
///     "Playgroup",
///     "12 months",
///     NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
/// )
/// .add_line("Admission Fee", dec!(5000))
/// .add_line("Tuition Fee", dec!(12000))
/// .payment_mode(PaymentMode::Upi)
/// .destination("invoices")
/// .build()
/// .unwrap();
///
/// assert_eq!(record.total, dec!(17000));
/// ```
pub struct InvoiceRecordBuilder {
    student_name: String,
    course: String,
    duration: String,
    issue_date: NaiveDate,
    lines: Vec<LineItem>,
    total: Option<Decimal>,
    payment_mode: PaymentMode,
    balance: Decimal,
    destination: Option<PathBuf>,
}

impl InvoiceRecordBuilder {
    pub fn new(
        student_name: impl Into<String>,
        course: impl Into<String>,
        duration: impl Into<String>,
        issue_date: NaiveDate,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            course: course.into(),
            duration: duration.into(),
            issue_date,
            lines: Vec::new(),
            total: None,
            payment_mode: PaymentMode::Cash,
            balance: Decimal::ZERO,
            destination: None,
        }
    }

    pub fn add_line(mut self, label: impl Into<String>, amount: Decimal) -> Self {
        self.lines.push(LineItem::new(label, amount));
        self
    }

    /// Append every usable row of a fee sheet.
    pub fn fees(mut self, sheet: FeeSheet) -> Self {
        self.lines.extend(sheet.into_line_items());
        self
    }

    /// Total printed on the receipt. Defaults to the sum of the lines.
    pub fn total(mut self, total: Decimal) -> Self {
        self.total = Some(total);
        self
    }

    pub fn payment_mode(mut self, mode: PaymentMode) -> Self {
        self.payment_mode = mode;
        self
    }

    pub fn balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    pub fn destination(mut self, folder: impl Into<PathBuf>) -> Self {
        self.destination = Some(folder.into());
        self
    }

    /// Build the record and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<InvoiceRecord, BillingError> {
        let record = self.build_unchecked()?;
        validation::ensure_valid(&record)?;
        Ok(record)
    }

    /// Build without validation.
    pub fn build_unchecked(self) -> Result<InvoiceRecord, BillingError> {
        let destination = self
            .destination
            .ok_or_else(|| BillingError::InvalidInput("destination folder is required".into()))?;
        let total = self
            .total
            .unwrap_or_else(|| self.lines.iter().map(|l| l.amount).sum());

        Ok(InvoiceRecord {
            student_name: self.student_name,
            course: self.course,
            duration: self.duration,
            issue_date: self.issue_date,
            lines: self.lines,
            total,
            payment_mode: self.payment_mode,
            balance: self.balance,
            destination,
        })
    }
}
