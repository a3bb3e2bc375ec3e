use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::BillingError;

/// The two receipt generations in use.
///
/// Numbering format and footer style are coupled: a deployment picks one
/// generation and every receipt it issues follows that generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptGeneration {
    /// `{prefix}{nnn}` numbers, signature block footer.
    #[default]
    Classic,
    /// `{prefix}{yy}-{nnnnn}` numbers, computer-generated disclaimer footer.
    Modern,
}

/// Closing block printed at the bottom of a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footer {
    /// Principal and parent/guardian signature placeholders.
    Signatures,
    /// Single line stating that no signature is required.
    Disclaimer,
}

impl ReceiptGeneration {
    /// Numbering scheme for this generation with the given prefix.
    pub fn numbering(self, prefix: impl Into<String>) -> NumberingScheme {
        match self {
            Self::Classic => NumberingScheme::Sequential {
                prefix: prefix.into(),
                width: 3,
            },
            Self::Modern => NumberingScheme::YearPrefixed {
                prefix: prefix.into(),
                width: 5,
            },
        }
    }

    pub fn footer(self) -> Footer {
        match self {
            Self::Classic => Footer::Signatures,
            Self::Modern => Footer::Disclaimer,
        }
    }
}

/// How a raw counter value becomes an invoice number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberingScheme {
    /// `LSK001`, `LSK002`, ... Widens past the padding width (`LSK1000`).
    Sequential { prefix: String, width: usize },
    /// `LSK25-00001`; the two-digit year comes from the allocation date.
    YearPrefixed { prefix: String, width: usize },
}

impl NumberingScheme {
    /// Format `value` as issued on `date`.
    pub fn format(&self, value: u64, date: NaiveDate) -> InvoiceNumber {
        let text = match self {
            Self::Sequential { prefix, width } => {
                format!("{prefix}{value:0>width$}", width = *width)
            }
            Self::YearPrefixed { prefix, width } => format!(
                "{prefix}{:02}-{value:0>width$}",
                date.year().rem_euclid(100),
                width = *width
            ),
        };
        InvoiceNumber {
            text,
            sequence: value,
        }
    }

    pub fn prefix(&self) -> &str {
        match self {
            Self::Sequential { prefix, .. } | Self::YearPrefixed { prefix, .. } => prefix,
        }
    }

    /// Recover the sequence value from a formatted number.
    pub fn parse(&self, text: &str) -> Result<InvoiceNumber, BillingError> {
        let rest = text.strip_prefix(self.prefix()).ok_or_else(|| {
            BillingError::Numbering(format!(
                "'{text}' does not start with prefix '{}'",
                self.prefix()
            ))
        })?;
        let digits = match self {
            Self::Sequential { .. } => rest,
            Self::YearPrefixed { .. } => match rest.split_once('-') {
                Some((year, digits)) if year.len() == 2 && is_digits(year) => digits,
                _ => {
                    return Err(BillingError::Numbering(format!(
                        "'{text}' has no two-digit year segment"
                    )));
                }
            },
        };
        if !is_digits(digits) {
            return Err(BillingError::Numbering(format!(
                "'{text}' has a non-numeric sequence part"
            )));
        }
        let sequence = digits
            .parse::<u64>()
            .map_err(|e| BillingError::Numbering(format!("'{text}': {e}")))?;
        Ok(InvoiceNumber {
            text: text.to_string(),
            sequence,
        })
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// An issued invoice number: its printed form and the counter value behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceNumber {
    text: String,
    sequence: u64,
}

impl InvoiceNumber {
    /// The printed identifier, e.g. `"LSK007"`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The numeric counter value, e.g. `7`.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// File name the renderer writes this receipt to.
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.text)
    }
}

impl std::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for InvoiceNumber {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn classic_numbers_are_three_digits() {
        let scheme = ReceiptGeneration::Classic.numbering("LSK");
        assert_eq!(scheme.format(1, date(2025, 1, 1)).as_str(), "LSK001");
        assert_eq!(scheme.format(42, date(2025, 1, 1)).as_str(), "LSK042");
        assert_eq!(scheme.format(999, date(2025, 1, 1)).as_str(), "LSK999");
    }

    #[test]
    fn classic_widens_past_padding() {
        let scheme = ReceiptGeneration::Classic.numbering("LSK");
        assert_eq!(scheme.format(1000, date(2025, 1, 1)).as_str(), "LSK1000");
    }

    #[test]
    fn modern_numbers_carry_year() {
        let scheme = ReceiptGeneration::Modern.numbering("LSK");
        let n = scheme.format(1, date(2025, 6, 15));
        assert_eq!(n.as_str(), "LSK25-00001");
        assert_eq!(n.sequence(), 1);
        assert_eq!(scheme.format(123, date(2030, 1, 1)).as_str(), "LSK30-00123");
    }

    #[test]
    fn modern_year_is_zero_padded() {
        let scheme = ReceiptGeneration::Modern.numbering("R");
        assert_eq!(scheme.format(7, date(2105, 3, 3)).as_str(), "R05-00007");
    }

    #[test]
    fn generation_couples_footer() {
        assert_eq!(ReceiptGeneration::Classic.footer(), Footer::Signatures);
        assert_eq!(ReceiptGeneration::Modern.footer(), Footer::Disclaimer);
    }

    #[test]
    fn parse_recovers_sequence() {
        let classic = ReceiptGeneration::Classic.numbering("LSK");
        assert_eq!(classic.parse("LSK017").unwrap().sequence(), 17);
        let modern = ReceiptGeneration::Modern.numbering("LSK");
        assert_eq!(modern.parse("LSK25-00420").unwrap().sequence(), 420);
    }

    #[test]
    fn parse_rejects_foreign_numbers() {
        let classic = ReceiptGeneration::Classic.numbering("LSK");
        assert!(classic.parse("ABC001").is_err());
        assert!(classic.parse("LSK").is_err());
        assert!(classic.parse("LSK12a").is_err());
        let modern = ReceiptGeneration::Modern.numbering("LSK");
        assert!(modern.parse("LSK00001").is_err());
        assert!(modern.parse("LSK2025-00001").is_err());
    }

    #[test]
    fn file_name_appends_pdf() {
        let scheme = ReceiptGeneration::Classic.numbering("LSK");
        assert_eq!(scheme.format(3, date(2025, 1, 1)).file_name(), "LSK003.pdf");
    }
}
