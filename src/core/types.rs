use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything printed on one receipt, except the invoice number.
///
/// `total` is whatever the caller supplies; it is never recomputed from
/// `lines`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub student_name: String,
    pub course: String,
    /// Free text, e.g. "6 months".
    pub duration: String,
    pub issue_date: NaiveDate,
    /// Rendered in this order, numbered from 1.
    pub lines: Vec<LineItem>,
    pub total: Decimal,
    pub payment_mode: PaymentMode,
    /// Outstanding balance after this payment.
    pub balance: Decimal,
    /// Folder the receipt PDF is written to.
    pub destination: PathBuf,
}

/// One billable entry on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// How a fee was paid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Credit,
    Debit,
    Upi,
    NetBanking,
    Cheque,
    DemandDraft,
    /// Any mode not in the standard list, printed verbatim.
    Other(String),
}

impl PaymentMode {
    /// The standard modes in the order a form should offer them.
    pub const STANDARD: [PaymentMode; 7] = [
        Self::Cash,
        Self::Credit,
        Self::Debit,
        Self::Upi,
        Self::NetBanking,
        Self::Cheque,
        Self::DemandDraft,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::Cash => "Cash",
            Self::Credit => "Credit",
            Self::Debit => "Debit",
            Self::Upi => "UPI",
            Self::NetBanking => "Netbanking",
            Self::Cheque => "Cheque",
            Self::DemandDraft => "Demand Draft",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = std::convert::Infallible;

    /// Standard labels match case-insensitively; anything else becomes `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(Self::STANDARD
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .unwrap_or_else(|| Self::Other(s.to_string())))
    }
}

/// Static header content printed at the top of every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub name: String,
    pub address: String,
    /// Additional centered lines under the address (web, mail, phone).
    pub contact_lines: Vec<String>,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            name: "LITTLE SKY KIDS".into(),
            address: "Unit 236-237, Lodha Signet, Kolshet West, Thane, Maharashtra - 400607"
                .into(),
            contact_lines: vec![
                "www.littleskykids.com | info.littleskykids@gmail.com".into(),
                "+91 8097918044 / +91 8600333649".into(),
            ],
        }
    }
}
