use rust_decimal::Decimal;

use super::error::{BillingError, ValidationError};
use super::types::*;

/// Upper bound on line items per receipt.
pub const MAX_LINE_ITEMS: usize = 10_000;
/// Upper bound on any single text field.
pub const MAX_TEXT_LEN: usize = 200;

/// Check that a record is well-formed enough to render.
/// Returns all validation errors found (not just the first).
///
/// The total is deliberately not compared with the sum of the lines: the
/// caller's total is printed as given.
pub fn validate_record(record: &InvoiceRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    required_text(&record.student_name, "student_name", &mut errors);
    required_text(&record.course, "course", &mut errors);
    required_text(&record.duration, "duration", &mut errors);
    required_text(record.payment_mode.label(), "payment_mode", &mut errors);

    if record.destination.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "destination",
            "destination folder must not be empty",
        ));
    }

    if record.lines.is_empty() {
        errors.push(ValidationError::new(
            "lines",
            "receipt must have at least one line item",
        ));
    } else if record.lines.len() > MAX_LINE_ITEMS {
        errors.push(ValidationError::new(
            "lines",
            format!("receipt cannot have more than {MAX_LINE_ITEMS} line items"),
        ));
    }

    for (i, line) in record.lines.iter().enumerate() {
        required_text(&line.label, &format!("lines.{i}.label"), &mut errors);
        non_negative(line.amount, &format!("lines.{i}.amount"), &mut errors);
    }

    non_negative(record.total, "total", &mut errors);
    non_negative(record.balance, "balance", &mut errors);

    errors
}

/// Validate `record`, joining every problem into one `InvalidInput` error.
pub(crate) fn ensure_valid(record: &InvoiceRecord) -> Result<(), BillingError> {
    let errors = validate_record(record);
    if errors.is_empty() {
        return Ok(());
    }
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    Err(BillingError::InvalidInput(msg))
}

fn required_text(value: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    } else if value.chars().count() > MAX_TEXT_LEN {
        errors.push(ValidationError::new(
            field,
            format!("cannot exceed {MAX_TEXT_LEN} characters"),
        ));
    }
}

fn non_negative(value: Decimal, field: &str, errors: &mut Vec<ValidationError>) {
    if value.is_sign_negative() && !value.is_zero() {
        errors.push(ValidationError::new(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
}
