use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::LineItem;

/// The standard fee catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeType {
    Admission,
    Tuition,
    Exam,
    Stationary,
    SecurityDeposit,
    Activity,
}

impl FeeType {
    /// Catalogue order; [`FeeSheet::add_standard`] hands these out front to back.
    pub const ALL: [FeeType; 6] = [
        Self::Admission,
        Self::Tuition,
        Self::Exam,
        Self::Stationary,
        Self::SecurityDeposit,
        Self::Activity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Admission => "Admission Fee",
            Self::Tuition => "Tuition Fee",
            Self::Exam => "Exam Fee",
            Self::Stationary => "Stationary Charges",
            Self::SecurityDeposit => "Security Deposits",
            Self::Activity => "Activity Charges",
        }
    }
}

impl std::fmt::Display for FeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Label of a fee row: a catalogue entry or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeLabel {
    Standard(FeeType),
    Custom(String),
}

impl FeeLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard(t) => t.label(),
            Self::Custom(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRow {
    pub label: FeeLabel,
    pub amount: Decimal,
}

/// The fee rows of a receipt being filled in.
///
/// Each catalogue entry appears at most once; custom rows are unrestricted.
/// Removing a standard row makes its fee type available again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeSheet {
    rows: Vec<FeeRow>,
}

impl FeeSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard fee types not yet on the sheet, in catalogue order.
    pub fn remaining(&self) -> Vec<FeeType> {
        FeeType::ALL
            .into_iter()
            .filter(|t| !self.uses(*t))
            .collect()
    }

    pub fn uses(&self, fee: FeeType) -> bool {
        self.rows
            .iter()
            .any(|r| r.label == FeeLabel::Standard(fee))
    }

    /// Add a row for the first unused standard fee type.
    /// Returns `None` once every catalogue entry is on the sheet.
    pub fn add_standard(&mut self) -> Option<usize> {
        let fee = FeeType::ALL.into_iter().find(|t| !self.uses(*t))?;
        self.rows.push(FeeRow {
            label: FeeLabel::Standard(fee),
            amount: Decimal::ZERO,
        });
        Some(self.rows.len() - 1)
    }

    /// Add a row for a specific standard fee type, unless it is already used.
    pub fn add_fee(&mut self, fee: FeeType) -> Option<usize> {
        if self.uses(fee) {
            return None;
        }
        self.rows.push(FeeRow {
            label: FeeLabel::Standard(fee),
            amount: Decimal::ZERO,
        });
        Some(self.rows.len() - 1)
    }

    pub fn add_custom(&mut self, label: impl Into<String>) -> usize {
        self.rows.push(FeeRow {
            label: FeeLabel::Custom(label.into()),
            amount: Decimal::ZERO,
        });
        self.rows.len() - 1
    }

    /// Set the amount of row `index`. Returns `false` if there is no such row.
    pub fn set_amount(&mut self, index: usize, amount: Decimal) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.amount = amount;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<FeeRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn rows(&self) -> &[FeeRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the rows that become line items.
    pub fn sum(&self) -> Decimal {
        self.rows
            .iter()
            .filter(|r| !r.label.as_str().trim().is_empty())
            .map(|r| r.amount)
            .sum()
    }

    /// Line items in row order. Custom rows with a blank label are dropped.
    pub fn into_line_items(self) -> Vec<LineItem> {
        self.rows
            .into_iter()
            .filter(|r| !r.label.as_str().trim().is_empty())
            .map(|r| LineItem {
                label: r.label.as_str().trim().to_string(),
                amount: r.amount,
            })
            .collect()
    }
}
