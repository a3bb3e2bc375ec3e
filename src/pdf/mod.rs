//! PDF rendering of fee receipts.
//!
//! Receipts are laid out on A4 with the standard Helvetica faces, so no font
//! files are embedded. The page flow follows a simple cell model: each cell
//! is placed at a cursor that moves right, or down to the next line, and a
//! cell that would cross the bottom margin continues on a fresh page.

mod fonts;
mod layout;
mod logo;
mod receipt;

pub use layout::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
pub use receipt::{
    DATE_FORMAT, DISCLAIMER, ReceiptStyle, SIGNATURE_LEFT, SIGNATURE_RIGHT, render_receipt,
    render_to_bytes,
};
