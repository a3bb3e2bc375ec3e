//! One-stop entry point for the form layer.

use std::path::PathBuf;

use crate::core::{
    BillingConfig, BillingError, CounterStore, InvoiceAllocator, InvoiceNumber, InvoiceRecord,
    ensure_valid,
};
use crate::pdf::{ReceiptStyle, render_receipt};

/// Allocates invoice numbers and renders receipts for one deployment.
///
/// Allocation is not transactional with rendering: a number handed out by
/// [`generate_invoice`](Self::generate_invoice) stays consumed even if the
/// PDF cannot be written afterwards.
#[derive(Debug)]
pub struct Biller {
    config: BillingConfig,
    allocator: InvoiceAllocator,
    style: ReceiptStyle,
}

impl Biller {
    pub fn new(config: BillingConfig) -> Self {
        let allocator = InvoiceAllocator::new(
            CounterStore::new(config.counter_path.clone()),
            config.numbering(),
        );
        let style = ReceiptStyle::from_config(&config);
        Self {
            config,
            allocator,
            style,
        }
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    pub fn allocator(&self) -> &InvoiceAllocator {
        &self.allocator
    }

    /// Consume and return the next invoice number.
    pub fn allocate_next_invoice_number(&self) -> Result<InvoiceNumber, BillingError> {
        self.allocator.allocate_next()
    }

    /// Render a receipt under an already allocated number into the record's
    /// destination folder.
    pub fn render(
        &self,
        record: &InvoiceRecord,
        number: &InvoiceNumber,
    ) -> Result<PathBuf, BillingError> {
        render_receipt(record, number, &record.destination, &self.style)
    }

    /// Validate the record, allocate a number for it, and write the receipt.
    ///
    /// An invalid record fails before a number is consumed. A render failure
    /// after allocation burns the allocated number.
    pub fn generate_invoice(&self, record: InvoiceRecord) -> Result<PathBuf, BillingError> {
        ensure_valid(&record)?;
        let number = self.allocator.allocate_next()?;
        self.render(&record, &number).inspect_err(|e| {
            tracing::warn!(
                invoice_number = %number,
                error = %e,
                "receipt not written; invoice number is burned"
            );
        })
    }
}
