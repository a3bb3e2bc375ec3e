//! # quittung
//!
//! Sequential invoice numbering and one-page PDF fee receipts for a small
//! school's front desk.
//!
//! Two pieces do the work: an allocator that turns a single persisted
//! counter file into unique, increasing invoice numbers, and a renderer that
//! lays a receipt out on an A4 page. The form that collects the data is not
//! part of this crate; it hands over a finished [`InvoiceRecord`] and gets a
//! file path back.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point,
//! and are printed with exactly two decimals.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Local;
//! use quittung::{Biller, BillingConfig, InvoiceRecordBuilder, PaymentMode};
//! use rust_decimal_macros::dec;
//!
//! let biller = Biller::new(BillingConfig::default());
//! let record = InvoiceRecordBuilder::new("Aarav Shah", "Playgroup", "12 months", Local::now().date_naive())
//!     .add_line("Admission Fee", dec!(5000))
//!     .add_line("Tuition Fee", dec!(12000))
//!     .payment_mode(PaymentMode::Upi)
//!     .destination(biller.config().default_output_dir())
//!     .build()
//!     .unwrap();
//!
//! let path = biller.generate_invoice(record).unwrap();
//! println!("receipt saved to {}", path.display());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record types, validation, config, counter-backed numbering |
//! | `pdf` (default) | PDF receipt rendering and the [`Biller`] facade |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "pdf")]
mod biller;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "pdf")]
pub use crate::biller::Biller;
